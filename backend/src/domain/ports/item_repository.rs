//! Port for item persistence.

use async_trait::async_trait;

use crate::domain::{Item, ItemId, ListId, NewItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
        /// The record points at a list or user that does not exist.
        MissingReference { message: String } => "item references a missing record: {message}",
    }
}

/// Record access for items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new item; the store assigns the identifier.
    async fn create(&self, item: &NewItem) -> Result<Item, ItemPersistenceError>;

    /// Fetch an item by identifier.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError>;

    /// Persist an item's name, description and parent list.
    async fn update(&self, item: &Item) -> Result<Item, ItemPersistenceError>;

    /// Remove an item.
    async fn delete(&self, id: ItemId) -> Result<(), ItemPersistenceError>;

    /// Remove every item of a list, returning how many were removed.
    async fn delete_by_list_id(&self, list_id: ListId) -> Result<u64, ItemPersistenceError>;

    /// Items of one list in creation order.
    async fn list_by_list_id(&self, list_id: ListId) -> Result<Vec<Item>, ItemPersistenceError>;
}
