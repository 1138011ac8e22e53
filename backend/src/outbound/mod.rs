//! Outbound adapters implementing domain ports.
//!
//! - **credentials**: Argon2id digests and HS256 session tokens
//! - **memory**: process-local store used in tests and database-less runs
//! - **persistence**: PostgreSQL repositories using Diesel
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no ownership or authorisation rules.

pub mod credentials;
pub mod memory;
pub mod persistence;
