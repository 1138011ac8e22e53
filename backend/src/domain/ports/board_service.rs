//! Driving port for list and item procedures.
//!
//! Request types carry the `userId` the client claimed; the service turns it
//! into an effective actor according to its configured policy.

use async_trait::async_trait;

use crate::domain::{
    BoardList, ClaimedUserId, Error, Item, ItemId, ItemPatch, ListId, ListPatch, ListStatus,
    ListWithItems, RequestContext,
};

/// Input for `createList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListRequest {
    /// Claimed owner.
    pub user_id: ClaimedUserId,
    /// Title.
    pub name: String,
    /// Initial stage; callers default it to `TODO`.
    pub status: ListStatus,
}

/// Input for `addItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemRequest {
    /// Parent list.
    pub list_id: ListId,
    /// Claimed creator.
    pub user_id: ClaimedUserId,
    /// Title.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for `editList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditListRequest {
    /// Target list.
    pub list_id: ListId,
    /// Claimed owner.
    pub user_id: ClaimedUserId,
    /// Fields to change.
    pub patch: ListPatch,
}

/// Input for `editItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditItemRequest {
    /// Target item.
    pub item_id: ItemId,
    /// Claimed creator.
    pub user_id: ClaimedUserId,
    /// Fields to change.
    pub patch: ItemPatch,
}

/// Input for `deleteItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteItemRequest {
    /// Target item.
    pub item_id: ItemId,
    /// Claimed creator.
    pub user_id: ClaimedUserId,
}

/// Input for `deleteList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteListRequest {
    /// Target list.
    pub list_id: ListId,
    /// Claimed owner.
    pub user_id: ClaimedUserId,
}

/// Input for `moveListStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveListStatusRequest {
    /// Target list.
    pub list_id: ListId,
    /// Claimed owner.
    pub user_id: ClaimedUserId,
    /// New stage.
    pub status: ListStatus,
}

/// Board use-cases.
#[async_trait]
pub trait BoardService: Send + Sync {
    /// Every list of every user with items. Requires a session.
    async fn get_lists(&self, context: &RequestContext) -> Result<Vec<ListWithItems>, Error>;

    /// Create a list for the effective actor.
    async fn create_list(
        &self,
        context: &RequestContext,
        request: CreateListRequest,
    ) -> Result<BoardList, Error>;

    /// Add an item for the effective actor.
    async fn add_item(
        &self,
        context: &RequestContext,
        request: AddItemRequest,
    ) -> Result<Item, Error>;

    /// Items of one list.
    async fn get_items(&self, context: &RequestContext, list_id: ListId)
    -> Result<Vec<Item>, Error>;

    /// Owner-only list edit.
    async fn edit_list(
        &self,
        context: &RequestContext,
        request: EditListRequest,
    ) -> Result<BoardList, Error>;

    /// Creator-only item edit.
    async fn edit_item(
        &self,
        context: &RequestContext,
        request: EditItemRequest,
    ) -> Result<Item, Error>;

    /// Creator-only item removal.
    async fn delete_item(
        &self,
        context: &RequestContext,
        request: DeleteItemRequest,
    ) -> Result<(), Error>;

    /// Owner-only list removal; items go first.
    async fn delete_list(
        &self,
        context: &RequestContext,
        request: DeleteListRequest,
    ) -> Result<(), Error>;

    /// Owner-only stage change.
    async fn move_list_status(
        &self,
        context: &RequestContext,
        request: MoveListStatusRequest,
    ) -> Result<BoardList, Error>;
}
