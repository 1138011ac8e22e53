//! Board procedure DTOs and parsing helpers.
//!
//! Identifiers arrive as camelCase JSON. `userId` accepts any string and is
//! passed on unparsed; a value that is not a user id simply owns nothing.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    AddItemRequest, CreateListRequest, DeleteItemRequest, DeleteListRequest, EditItemRequest,
    EditListRequest, MoveListStatusRequest,
};
use crate::domain::{ClaimedUserId, Error, ItemId, ItemPatch, ListId, ListPatch};
use crate::inbound::http::validation::{STATUS, parse_optional_status, parse_status};

/// Body of `createList`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    #[schema(example = "Groceries")]
    pub name: String,
    /// Defaults to `TODO`.
    #[schema(example = "TODO")]
    pub status: Option<String>,
}

/// Body of `addItem`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemBody {
    pub list_id: i64,
    pub user_id: String,
    #[schema(example = "Milk")]
    pub name: String,
    pub description: Option<String>,
}

/// Query of `getItems`.
#[derive(Debug, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetItemsQuery {
    /// Parent list.
    pub list_id: i64,
}

/// Body of `editList`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditListBody {
    pub list_id: i64,
    pub user_id: String,
    pub name: Option<String>,
    pub status: Option<String>,
}

/// Body of `editItem`. Empty strings and a zero `listId` mean "unchanged".
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditItemBody {
    pub item_id: i64,
    pub user_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub list_id: Option<i64>,
}

/// Body of `deleteItem`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemBody {
    pub item_id: i64,
    pub user_id: String,
}

/// Body of `deleteList`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteListBody {
    pub list_id: i64,
    pub user_id: String,
}

/// Body of `moveListStatus`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveListStatusBody {
    pub list_id: i64,
    pub user_id: String,
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
}

impl TryFrom<CreateListBody> for CreateListRequest {
    type Error = Error;

    fn try_from(body: CreateListBody) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: ClaimedUserId::new(body.user_id),
            name: body.name,
            status: parse_optional_status(body.status.as_deref(), STATUS)?.unwrap_or_default(),
        })
    }
}

impl TryFrom<AddItemBody> for AddItemRequest {
    type Error = Error;

    fn try_from(body: AddItemBody) -> Result<Self, Self::Error> {
        Ok(Self {
            list_id: ListId::new(body.list_id),
            user_id: ClaimedUserId::new(body.user_id),
            name: body.name,
            description: body.description,
        })
    }
}

impl TryFrom<EditListBody> for EditListRequest {
    type Error = Error;

    fn try_from(body: EditListBody) -> Result<Self, Self::Error> {
        Ok(Self {
            list_id: ListId::new(body.list_id),
            user_id: ClaimedUserId::new(body.user_id),
            patch: ListPatch {
                name: body.name,
                status: parse_optional_status(body.status.as_deref(), STATUS)?,
            },
        })
    }
}

impl TryFrom<EditItemBody> for EditItemRequest {
    type Error = Error;

    fn try_from(body: EditItemBody) -> Result<Self, Self::Error> {
        Ok(Self {
            item_id: ItemId::new(body.item_id),
            user_id: ClaimedUserId::new(body.user_id),
            patch: ItemPatch {
                name: body.name,
                description: body.description,
                list_id: body.list_id.map(ListId::new),
            },
        })
    }
}

impl TryFrom<DeleteItemBody> for DeleteItemRequest {
    type Error = Error;

    fn try_from(body: DeleteItemBody) -> Result<Self, Self::Error> {
        Ok(Self {
            item_id: ItemId::new(body.item_id),
            user_id: ClaimedUserId::new(body.user_id),
        })
    }
}

impl TryFrom<DeleteListBody> for DeleteListRequest {
    type Error = Error;

    fn try_from(body: DeleteListBody) -> Result<Self, Self::Error> {
        Ok(Self {
            list_id: ListId::new(body.list_id),
            user_id: ClaimedUserId::new(body.user_id),
        })
    }
}

impl TryFrom<MoveListStatusBody> for MoveListStatusRequest {
    type Error = Error;

    fn try_from(body: MoveListStatusBody) -> Result<Self, Self::Error> {
        Ok(Self {
            list_id: ListId::new(body.list_id),
            user_id: ClaimedUserId::new(body.user_id),
            status: parse_status(&body.status, STATUS)?,
        })
    }
}
