//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CredentialService`]) are implemented by
//! outbound adapters. Driving ports ([`AccountService`], [`BoardService`])
//! are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod board_service;
mod credential_service;
mod item_repository;
mod list_repository;
mod user_repository;

pub use account_service::{AccountService, LoginOutcome};
pub use board_service::{
    AddItemRequest, BoardService, CreateListRequest, DeleteItemRequest, DeleteListRequest,
    EditItemRequest, EditListRequest, MoveListStatusRequest,
};
#[cfg(test)]
pub use credential_service::MockCredentialService;
pub use credential_service::{CredentialError, CredentialService};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemPersistenceError, ItemRepository};
#[cfg(test)]
pub use list_repository::MockListRepository;
pub use list_repository::{ListPersistenceError, ListRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
