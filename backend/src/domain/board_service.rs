//! List and item procedures.
//!
//! Mutations compare the stored owner with the effective actor chosen by the
//! configured [`ActorPolicy`]. A missing record and a record owned by someone
//! else produce the same error, so callers cannot discover identifiers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AddItemRequest, BoardService, CreateListRequest, DeleteItemRequest, DeleteListRequest,
    EditItemRequest, EditListRequest, ItemPersistenceError, ItemRepository,
    ListPersistenceError, ListRepository, MoveListStatusRequest,
};
use crate::domain::{
    ActorPolicy, BoardList, ClaimedUserId, Error, Item, ItemId, ListId, ListPatch,
    ListWithItems, NewItem, NewList, RequestContext, UserId,
};

/// Message for list mutations by non-owners or on missing lists.
pub const LIST_NOT_FOUND: &str = "List not found or user does not have permission";
/// Message for item mutations by non-creators or on missing items.
pub const ITEM_NOT_FOUND: &str = "Item not found or user does not have permission";
/// Message for records that point at a missing user or list.
pub const MISSING_REFERENCE: &str = "Referenced user or list does not exist";

/// Board service implementing the [`BoardService`] driving port.
#[derive(Clone)]
pub struct BoardServiceImpl<L, I> {
    lists: Arc<L>,
    items: Arc<I>,
    actor_policy: ActorPolicy,
}

impl<L, I> BoardServiceImpl<L, I> {
    /// Create a new service with the given actor policy.
    pub fn new(lists: Arc<L>, items: Arc<I>, actor_policy: ActorPolicy) -> Self {
        Self {
            lists,
            items,
            actor_policy,
        }
    }

    /// Policy used to pick the effective actor.
    pub fn actor_policy(&self) -> ActorPolicy {
        self.actor_policy
    }
}

fn map_list_error(err: ListPersistenceError) -> Error {
    match err {
        ListPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("list repository unavailable: {message}"))
        }
        ListPersistenceError::Query { message } => {
            Error::internal(format!("list repository error: {message}"))
        }
        ListPersistenceError::MissingReference { message } => {
            debug!(%message, "list write rejected by store");
            Error::invalid_request(MISSING_REFERENCE)
        }
        ListPersistenceError::StillReferenced { message } => {
            Error::internal(format!("list removal blocked: {message}"))
        }
    }
}

fn map_item_error(err: ItemPersistenceError) -> Error {
    match err {
        ItemPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("item repository unavailable: {message}"))
        }
        ItemPersistenceError::Query { message } => {
            Error::internal(format!("item repository error: {message}"))
        }
        ItemPersistenceError::MissingReference { message } => {
            debug!(%message, "item write rejected by store");
            Error::invalid_request(MISSING_REFERENCE)
        }
    }
}

fn logged<T>(result: Result<T, Error>, procedure: &'static str) -> Result<T, Error> {
    if let Err(err) = &result
        && err.code().is_redacted()
    {
        error!(procedure, error = %err, "procedure failed");
    }
    result
}

impl<L, I> BoardServiceImpl<L, I>
where
    L: ListRepository,
    I: ItemRepository,
{
    /// Owner for a new record. A claim naming nobody is rejected the way the
    /// store rejects an unknown user.
    fn creator(
        &self,
        context: &RequestContext,
        claimed: &ClaimedUserId,
    ) -> Result<UserId, Error> {
        self.actor_policy
            .effective_actor(context, claimed)?
            .ok_or_else(|| {
                debug!(claimed = claimed.as_str(), "claimed user id is malformed");
                Error::invalid_request(MISSING_REFERENCE)
            })
    }

    async fn owned_list(
        &self,
        list_id: ListId,
        actor: Option<UserId>,
    ) -> Result<BoardList, Error> {
        match self.lists.find_by_id(list_id).await.map_err(map_list_error)? {
            Some(list) if Some(list.owner_id) == actor => Ok(list),
            _ => {
                debug!(%list_id, ?actor, "list missing or not owned by actor");
                Err(Error::not_found_or_forbidden(LIST_NOT_FOUND))
            }
        }
    }

    async fn owned_item(&self, item_id: ItemId, actor: Option<UserId>) -> Result<Item, Error> {
        match self.items.find_by_id(item_id).await.map_err(map_item_error)? {
            Some(item) if Some(item.owner_id) == actor => Ok(item),
            _ => {
                debug!(%item_id, ?actor, "item missing or not owned by actor");
                Err(Error::not_found_or_forbidden(ITEM_NOT_FOUND))
            }
        }
    }

    async fn apply_list_patch(
        &self,
        context: &RequestContext,
        list_id: ListId,
        claimed: &ClaimedUserId,
        patch: &ListPatch,
    ) -> Result<BoardList, Error> {
        let actor = self.actor_policy.effective_actor(context, claimed)?;
        let stored = self.owned_list(list_id, actor).await?;
        let updated = patch.merge(&stored);
        self.lists.update(&updated).await.map_err(map_list_error)
    }
}

#[async_trait]
impl<L, I> BoardService for BoardServiceImpl<L, I>
where
    L: ListRepository,
    I: ItemRepository,
{
    async fn get_lists(&self, context: &RequestContext) -> Result<Vec<ListWithItems>, Error> {
        context.require_identity()?;
        logged(
            self.lists
                .list_all_with_items()
                .await
                .map_err(map_list_error),
            "getLists",
        )
    }

    async fn create_list(
        &self,
        context: &RequestContext,
        request: CreateListRequest,
    ) -> Result<BoardList, Error> {
        let owner_id = match self.creator(context, &request.user_id) {
            Ok(owner_id) => owner_id,
            Err(err) => return logged(Err(err), "createList"),
        };
        let new_list = NewList {
            name: request.name,
            status: request.status,
            owner_id,
        };
        let result = self.lists.create(&new_list).await.map_err(map_list_error);
        if let Ok(list) = &result {
            info!(list_id = %list.id, owner_id = %list.owner_id, "list created");
        }
        logged(result, "createList")
    }

    async fn add_item(
        &self,
        context: &RequestContext,
        request: AddItemRequest,
    ) -> Result<Item, Error> {
        let owner_id = match self.creator(context, &request.user_id) {
            Ok(owner_id) => owner_id,
            Err(err) => return logged(Err(err), "addItem"),
        };
        let new_item = NewItem {
            name: request.name,
            description: request.description,
            list_id: request.list_id,
            owner_id,
        };
        let result = self.items.create(&new_item).await.map_err(map_item_error);
        if let Ok(item) = &result {
            info!(item_id = %item.id, list_id = %item.list_id, "item added");
        }
        logged(result, "addItem")
    }

    async fn get_items(
        &self,
        _context: &RequestContext,
        list_id: ListId,
    ) -> Result<Vec<Item>, Error> {
        logged(
            self.items
                .list_by_list_id(list_id)
                .await
                .map_err(map_item_error),
            "getItems",
        )
    }

    async fn edit_list(
        &self,
        context: &RequestContext,
        request: EditListRequest,
    ) -> Result<BoardList, Error> {
        let result = self
            .apply_list_patch(context, request.list_id, &request.user_id, &request.patch)
            .await;
        logged(result, "editList")
    }

    async fn edit_item(
        &self,
        context: &RequestContext,
        request: EditItemRequest,
    ) -> Result<Item, Error> {
        let result = async {
            let actor = self.actor_policy.effective_actor(context, &request.user_id)?;
            let stored = self.owned_item(request.item_id, actor).await?;
            let updated = request.patch.merge(&stored);
            self.items.update(&updated).await.map_err(map_item_error)
        }
        .await;
        logged(result, "editItem")
    }

    async fn delete_item(
        &self,
        context: &RequestContext,
        request: DeleteItemRequest,
    ) -> Result<(), Error> {
        let result = async {
            let actor = self.actor_policy.effective_actor(context, &request.user_id)?;
            let item = self.owned_item(request.item_id, actor).await?;
            self.items.delete(item.id).await.map_err(map_item_error)?;
            info!(item_id = %item.id, "item deleted");
            Ok::<(), Error>(())
        }
        .await;
        logged(result, "deleteItem")
    }

    async fn delete_list(
        &self,
        context: &RequestContext,
        request: DeleteListRequest,
    ) -> Result<(), Error> {
        let result = async {
            let actor = self.actor_policy.effective_actor(context, &request.user_id)?;
            let list = self.owned_list(request.list_id, actor).await?;
            // Two separate writes: a reader in between sees the list without
            // its items.
            let removed = self
                .items
                .delete_by_list_id(list.id)
                .await
                .map_err(map_item_error)?;
            self.lists.delete(list.id).await.map_err(map_list_error)?;
            info!(list_id = %list.id, removed_items = removed, "list deleted");
            Ok::<(), Error>(())
        }
        .await;
        logged(result, "deleteList")
    }

    async fn move_list_status(
        &self,
        context: &RequestContext,
        request: MoveListStatusRequest,
    ) -> Result<BoardList, Error> {
        let patch = ListPatch {
            name: None,
            status: Some(request.status),
        };
        let result = self
            .apply_list_patch(context, request.list_id, &request.user_id, &patch)
            .await;
        logged(result, "moveListStatus")
    }
}

#[cfg(test)]
#[path = "board_service_tests.rs"]
mod tests;
