//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{items, lists, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

/// Row inserted into `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: &'a str,
    pub password_digest: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row read from `lists`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListRow {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub user_id: Uuid,
}

/// Row inserted into `lists`; the database assigns `id`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lists)]
pub(crate) struct NewListRow<'a> {
    pub name: &'a str,
    pub status: &'a str,
    pub user_id: Uuid,
}

/// Mutable columns of `lists`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lists)]
pub(crate) struct ListUpdate<'a> {
    pub name: &'a str,
    pub status: &'a str,
}

/// Row read from `items`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = items)]
#[diesel(belongs_to(ListRow, foreign_key = list_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub list_id: i64,
    pub user_id: Uuid,
}

/// Row inserted into `items`; the database assigns `id`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub list_id: i64,
    pub user_id: Uuid,
}

/// Mutable columns of `items`.
///
/// `description` is written even when `None`, so the stored value always
/// matches the merged domain item.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ItemUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub list_id: i64,
}
