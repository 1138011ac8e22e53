//! Port for list persistence.

use async_trait::async_trait;

use crate::domain::{BoardList, ListId, ListWithItems, NewList};

use super::define_port_error;

define_port_error! {
    /// Errors raised by list repository adapters.
    pub enum ListPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "list repository query failed: {message}",
        /// The record points at a user that does not exist.
        MissingReference { message: String } => "list references a missing record: {message}",
        /// Items still point at the list being removed.
        StillReferenced { message: String } => "list is still referenced: {message}",
    }
}

/// Record access for lists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Store a new list; the store assigns the identifier.
    async fn create(&self, list: &NewList) -> Result<BoardList, ListPersistenceError>;

    /// Fetch a list by identifier.
    async fn find_by_id(&self, id: ListId) -> Result<Option<BoardList>, ListPersistenceError>;

    /// Persist a list's name and status; other fields are ignored.
    async fn update(&self, list: &BoardList) -> Result<BoardList, ListPersistenceError>;

    /// Remove a list. Items must already be gone.
    async fn delete(&self, id: ListId) -> Result<(), ListPersistenceError>;

    /// Every list of every user, each with its items, in creation order.
    async fn list_all_with_items(&self) -> Result<Vec<ListWithItems>, ListPersistenceError>;
}
