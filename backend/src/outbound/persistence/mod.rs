//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories implement the domain's record ports on top of `diesel-async`
//! with `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between row structs and
//!   domain records; ownership rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures are classified once and
//!   mapped into each port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use taskboard::outbound::persistence::{DbPool, DieselListRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/board")).await?;
//! let lists = DieselListRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_item_repository;
mod diesel_list_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_list_repository::DieselListRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
