//! List and item procedures.
//!
//! ```text
//! GET  /api/v1/rpc/getLists
//! GET  /api/v1/rpc/getItems?listId=1
//! POST /api/v1/rpc/createList {"userId":"…","name":"Groceries"}
//! POST /api/v1/rpc/addItem {"listId":1,"userId":"…","name":"Milk"}
//! POST /api/v1/rpc/editList {"listId":1,"userId":"…","name":"Weekend"}
//! POST /api/v1/rpc/editItem {"itemId":7,"userId":"…","description":"oat"}
//! POST /api/v1/rpc/deleteItem {"itemId":7,"userId":"…"}
//! POST /api/v1/rpc/deleteList {"listId":1,"userId":"…"}
//! POST /api/v1/rpc/moveListStatus {"listId":1,"userId":"…","status":"DONE"}
//! ```
//!
//! Request-shape problems become HTTP 400 before the procedure runs.
//! Everything the procedure itself rejects comes back as `{error}` with 200.

use actix_web::{get, post, web};

use crate::domain::ports::{
    AddItemRequest, CreateListRequest, DeleteItemRequest, DeleteListRequest, EditItemRequest,
    EditListRequest, MoveListStatusRequest,
};
use crate::domain::{BoardList, Error, Item, ListId, ListWithItems};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::Caller;
use crate::inbound::http::envelope::{
    Envelope, ItemUpdatedResponse, ListUpdatedResponse, MessageResponse,
};
use crate::inbound::http::state::HttpState;

pub use super::board_dto::{
    AddItemBody, CreateListBody, DeleteItemBody, DeleteListBody, EditItemBody, EditListBody,
    GetItemsQuery, MoveListStatusBody,
};

const LIST_UPDATED: &str = "List updated successfully";
const ITEM_UPDATED: &str = "Item updated successfully";
const ITEM_DELETED: &str = "Item deleted successfully";
const LIST_DELETED: &str = "List deleted successfully";

/// Every list of every user, each with its items.
#[utoipa::path(
    get,
    path = "/api/v1/rpc/getLists",
    responses(
        (status = 200, description = "Lists with items", body = [ListWithItems]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "getLists"
)]
#[get("/getLists")]
pub async fn get_lists(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<Envelope<Vec<ListWithItems>>> {
    Ok(state.board.get_lists(caller.context()).await.into())
}

/// Items of one list.
#[utoipa::path(
    get,
    path = "/api/v1/rpc/getItems",
    params(GetItemsQuery),
    responses(
        (status = 200, description = "Items of the list", body = [Item]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "getItems"
)]
#[get("/getItems")]
pub async fn get_items(
    state: web::Data<HttpState>,
    caller: Caller,
    query: web::Query<GetItemsQuery>,
) -> ApiResult<Envelope<Vec<Item>>> {
    let list_id = ListId::new(query.list_id);
    Ok(state.board.get_items(caller.context(), list_id).await.into())
}

/// Create a list.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/createList",
    request_body = CreateListBody,
    responses(
        (status = 200, description = "Created list, or `{error}`", body = BoardList),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "createList"
)]
#[post("/createList")]
pub async fn create_list(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateListBody>,
) -> ApiResult<Envelope<BoardList>> {
    let request = CreateListRequest::try_from(payload.into_inner())?;
    Ok(state.board.create_list(caller.context(), request).await.into())
}

/// Add an item to a list.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/addItem",
    request_body = AddItemBody,
    responses(
        (status = 200, description = "Created item, or `{error}`", body = Item),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "addItem"
)]
#[post("/addItem")]
pub async fn add_item(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<AddItemBody>,
) -> ApiResult<Envelope<Item>> {
    let request = AddItemRequest::try_from(payload.into_inner())?;
    Ok(state.board.add_item(caller.context(), request).await.into())
}

/// Owner-only list edit.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/editList",
    request_body = EditListBody,
    responses(
        (status = 200, description = "Updated list, or `{error}`", body = ListUpdatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "editList"
)]
#[post("/editList")]
pub async fn edit_list(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<EditListBody>,
) -> ApiResult<Envelope<ListUpdatedResponse>> {
    let request = EditListRequest::try_from(payload.into_inner())?;
    let result = state
        .board
        .edit_list(caller.context(), request)
        .await
        .map(|list| ListUpdatedResponse {
            message: LIST_UPDATED.to_owned(),
            list,
        });
    Ok(result.into())
}

/// Creator-only item edit.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/editItem",
    request_body = EditItemBody,
    responses(
        (status = 200, description = "Updated item, or `{error}`", body = ItemUpdatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "editItem"
)]
#[post("/editItem")]
pub async fn edit_item(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<EditItemBody>,
) -> ApiResult<Envelope<ItemUpdatedResponse>> {
    let request = EditItemRequest::try_from(payload.into_inner())?;
    let result = state
        .board
        .edit_item(caller.context(), request)
        .await
        .map(|item| ItemUpdatedResponse {
            message: ITEM_UPDATED.to_owned(),
            item,
        });
    Ok(result.into())
}

/// Creator-only item removal.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/deleteItem",
    request_body = DeleteItemBody,
    responses(
        (status = 200, description = "Deletion acknowledged, or `{error}`", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "deleteItem"
)]
#[post("/deleteItem")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<DeleteItemBody>,
) -> ApiResult<Envelope<MessageResponse>> {
    let request = DeleteItemRequest::try_from(payload.into_inner())?;
    let result = state
        .board
        .delete_item(caller.context(), request)
        .await
        .map(|()| MessageResponse::new(ITEM_DELETED));
    Ok(result.into())
}

/// Owner-only list removal. Items are deleted first.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/deleteList",
    request_body = DeleteListBody,
    responses(
        (status = 200, description = "Deletion acknowledged, or `{error}`", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "deleteList"
)]
#[post("/deleteList")]
pub async fn delete_list(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<DeleteListBody>,
) -> ApiResult<Envelope<MessageResponse>> {
    let request = DeleteListRequest::try_from(payload.into_inner())?;
    let result = state
        .board
        .delete_list(caller.context(), request)
        .await
        .map(|()| MessageResponse::new(LIST_DELETED));
    Ok(result.into())
}

/// Owner-only stage change. Any stage may follow any other.
#[utoipa::path(
    post,
    path = "/api/v1/rpc/moveListStatus",
    request_body = MoveListStatusBody,
    responses(
        (status = 200, description = "Updated list, or `{error}`", body = BoardList),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["board"],
    operation_id = "moveListStatus"
)]
#[post("/moveListStatus")]
pub async fn move_list_status(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<MoveListStatusBody>,
) -> ApiResult<Envelope<BoardList>> {
    let request = MoveListStatusRequest::try_from(payload.into_inner())?;
    Ok(state
        .board
        .move_list_status(caller.context(), request)
        .await
        .into())
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
