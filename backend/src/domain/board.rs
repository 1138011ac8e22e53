//! Board entities: lists (columns/cards) and the items they hold.
//!
//! Identifiers are assigned by the record store. Ownership is recorded once
//! at creation and is the only key used for authorisation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;

/// Store-assigned list identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ListId(i64);

impl ListId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow stage of a list.
///
/// Any stage may move to any other stage, including backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListStatus {
    /// Not started.
    #[default]
    Todo,
    /// Work under way.
    InProgress,
    /// Finished.
    Done,
}

impl ListStatus {
    /// Canonical wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not one of the three stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of TODO, IN_PROGRESS, DONE; got {value}")]
pub struct ListStatusParseError {
    /// Rejected input.
    pub value: String,
}

impl FromStr for ListStatus {
    type Err = ListStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            other => Err(ListStatusParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A board column owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 1)]
    pub id: ListId,
    /// Title.
    #[schema(example = "Groceries")]
    pub name: String,
    /// Current stage.
    pub status: ListStatus,
    /// Owner; serialised as `userId`.
    #[serde(rename = "userId")]
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub owner_id: UserId,
}

/// A sub-task inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 7)]
    pub id: ItemId,
    /// Title.
    #[schema(example = "Milk")]
    pub name: String,
    /// Optional free text; `null` when absent.
    pub description: Option<String>,
    /// Parent list.
    #[schema(value_type = i64, example = 1)]
    pub list_id: ListId,
    /// Creator; serialised as `userId`.
    #[serde(rename = "userId")]
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub owner_id: UserId,
}

/// A list returned together with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListWithItems {
    /// The list itself, flattened into the same JSON object.
    #[serde(flatten)]
    pub list: BoardList,
    /// Items currently attached to the list.
    pub items: Vec<Item>,
}

/// Values for a list about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    /// Title.
    pub name: String,
    /// Initial stage.
    pub status: ListStatus,
    /// Owner.
    pub owner_id: UserId,
}

/// Values for an item about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Title.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent list.
    pub list_id: ListId,
    /// Creator.
    pub owner_id: UserId,
}

/// Partial update for a list.
///
/// Absent fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    /// Replacement title.
    pub name: Option<String>,
    /// Replacement stage.
    pub status: Option<ListStatus>,
}

impl ListPatch {
    /// Apply the patch to a stored list.
    ///
    /// Identity and ownership are never touched.
    ///
    /// # Examples
    /// ```
    /// use taskboard::domain::{BoardList, ListId, ListPatch, ListStatus, UserId};
    ///
    /// let stored = BoardList {
    ///     id: ListId::new(1),
    ///     name: "Groceries".into(),
    ///     status: ListStatus::Todo,
    ///     owner_id: UserId::random(),
    /// };
    /// let patch = ListPatch { name: None, status: Some(ListStatus::Done) };
    /// let merged = patch.merge(&stored);
    /// assert_eq!(merged.name, "Groceries");
    /// assert_eq!(merged.status, ListStatus::Done);
    /// ```
    pub fn merge(&self, existing: &BoardList) -> BoardList {
        BoardList {
            id: existing.id,
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            status: self.status.unwrap_or(existing.status),
            owner_id: existing.owner_id,
        }
    }
}

/// Partial update for an item.
///
/// Absent fields keep the stored value, and so do empty strings and a zero
/// list id: clients send those as "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// Replacement title; empty keeps the stored one.
    pub name: Option<String>,
    /// Replacement description; empty keeps the stored one.
    pub description: Option<String>,
    /// New parent list; zero keeps the stored one.
    pub list_id: Option<ListId>,
}

impl ItemPatch {
    /// Apply the patch to a stored item.
    pub fn merge(&self, existing: &Item) -> Item {
        Item {
            id: existing.id,
            name: non_empty(self.name.as_deref())
                .map_or_else(|| existing.name.clone(), str::to_owned),
            description: non_empty(self.description.as_deref())
                .map(str::to_owned)
                .or_else(|| existing.description.clone()),
            list_id: self
                .list_id
                .filter(|id| id.get() != 0)
                .unwrap_or(existing.list_id),
            owner_id: existing.owner_id,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn owner() -> UserId {
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id")
    }

    #[fixture]
    fn stored_list(owner: UserId) -> BoardList {
        BoardList {
            id: ListId::new(1),
            name: "Groceries".to_owned(),
            status: ListStatus::InProgress,
            owner_id: owner,
        }
    }

    #[fixture]
    fn stored_item(owner: UserId) -> Item {
        Item {
            id: ItemId::new(7),
            name: "Milk".to_owned(),
            description: Some("semi-skimmed".to_owned()),
            list_id: ListId::new(1),
            owner_id: owner,
        }
    }

    #[rstest]
    #[case("TODO", ListStatus::Todo)]
    #[case("IN_PROGRESS", ListStatus::InProgress)]
    #[case("DONE", ListStatus::Done)]
    fn status_round_trips_through_text(#[case] raw: &str, #[case] status: ListStatus) {
        assert_eq!(raw.parse::<ListStatus>(), Ok(status));
        assert_eq!(status.as_str(), raw);
        assert_eq!(serde_json::to_value(status).expect("serialises"), json!(raw));
    }

    #[rstest]
    #[case("todo")]
    #[case("ARCHIVED")]
    #[case("")]
    fn status_rejects_unknown_values(#[case] raw: &str) {
        assert!(raw.parse::<ListStatus>().is_err());
        assert!(serde_json::from_value::<ListStatus>(json!(raw)).is_err());
    }

    #[rstest]
    fn status_defaults_to_todo() {
        assert_eq!(ListStatus::default(), ListStatus::Todo);
    }

    #[rstest]
    fn list_patch_keeps_absent_fields(stored_list: BoardList) {
        let merged = ListPatch::default().merge(&stored_list);
        assert_eq!(merged, stored_list);
    }

    #[rstest]
    fn list_patch_applies_empty_name(stored_list: BoardList) {
        let patch = ListPatch {
            name: Some(String::new()),
            status: None,
        };
        let merged = patch.merge(&stored_list);
        assert_eq!(merged.name, "");
        assert_eq!(merged.status, ListStatus::InProgress);
    }

    #[rstest]
    fn list_patch_replaces_supplied_fields(stored_list: BoardList) {
        let patch = ListPatch {
            name: Some("Weekend".to_owned()),
            status: Some(ListStatus::Todo),
        };
        let merged = patch.merge(&stored_list);
        assert_eq!(merged.name, "Weekend");
        assert_eq!(merged.status, ListStatus::Todo);
        assert_eq!(merged.owner_id, stored_list.owner_id);
    }

    #[rstest]
    #[case(ItemPatch::default())]
    #[case(ItemPatch { name: Some(String::new()), description: Some(String::new()), list_id: Some(ListId::new(0)) })]
    fn item_patch_treats_empty_values_as_unchanged(stored_item: Item, #[case] patch: ItemPatch) {
        assert_eq!(patch.merge(&stored_item), stored_item);
    }

    #[rstest]
    fn item_patch_replaces_supplied_fields(stored_item: Item) {
        let patch = ItemPatch {
            name: Some("Oat milk".to_owned()),
            description: Some("barista".to_owned()),
            list_id: Some(ListId::new(2)),
        };
        let merged = patch.merge(&stored_item);
        assert_eq!(merged.name, "Oat milk");
        assert_eq!(merged.description.as_deref(), Some("barista"));
        assert_eq!(merged.list_id, ListId::new(2));
        assert_eq!(merged.id, stored_item.id);
    }

    #[rstest]
    fn item_patch_keeps_missing_description_missing(mut stored_item: Item) {
        stored_item.description = None;
        let patch = ItemPatch {
            description: Some(String::new()),
            ..ItemPatch::default()
        };
        assert_eq!(patch.merge(&stored_item).description, None);
    }

    #[rstest]
    fn list_with_items_flattens_list_fields(stored_list: BoardList, stored_item: Item) {
        let value = serde_json::to_value(ListWithItems {
            list: stored_list,
            items: vec![stored_item],
        })
        .expect("serialises");

        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Groceries",
                "status": "IN_PROGRESS",
                "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "items": [{
                    "id": 7,
                    "name": "Milk",
                    "description": "semi-skimmed",
                    "listId": 1,
                    "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                }],
            })
        );
    }
}
