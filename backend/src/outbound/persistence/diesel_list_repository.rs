//! PostgreSQL-backed `ListRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ListPersistenceError, ListRepository};
use crate::domain::{BoardList, ListId, ListStatus, ListWithItems, NewList, UserId};

use super::diesel_error_mapping::{DieselFailure, classify};
use super::diesel_item_repository::row_to_item;
use super::models::{ItemRow, ListRow, ListUpdate, NewListRow};
use super::pool::{DbPool, PoolError};
use super::schema::{items, lists};

/// Diesel implementation of [`ListRepository`].
#[derive(Clone)]
pub struct DieselListRepository {
    pool: DbPool,
}

impl DieselListRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListPersistenceError {
    ListPersistenceError::connection(error.into_message())
}

/// A foreign-key failure on delete means items still point at the list.
fn map_delete_error(error: diesel::result::Error) -> ListPersistenceError {
    match map_diesel_error(error) {
        ListPersistenceError::MissingReference { message } => {
            ListPersistenceError::still_referenced(message)
        }
        other => other,
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ListPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => ListPersistenceError::connection(message),
        DieselFailure::ForeignKey(constraint) => {
            ListPersistenceError::missing_reference(constraint)
        }
        DieselFailure::Unique(constraint) => ListPersistenceError::query(constraint),
        DieselFailure::Query(message) => ListPersistenceError::query(message),
    }
}

pub(super) fn row_to_list(row: ListRow) -> Result<BoardList, ListPersistenceError> {
    let status = row.status.parse::<ListStatus>().map_err(|err| {
        warn!(list_id = row.id, error = %err, "stored list status is not recognised");
        ListPersistenceError::query("stored list record is invalid")
    })?;
    Ok(BoardList {
        id: ListId::new(row.id),
        name: row.name,
        status,
        owner_id: UserId::from_uuid(row.user_id),
    })
}

#[async_trait]
impl ListRepository for DieselListRepository {
    async fn create(&self, list: &NewList) -> Result<BoardList, ListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewListRow {
            name: list.name.as_str(),
            status: list.status.as_str(),
            user_id: *list.owner_id.as_uuid(),
        };
        let stored: ListRow = diesel::insert_into(lists::table)
            .values(&row)
            .returning(ListRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_list(stored)
    }

    async fn find_by_id(&self, id: ListId) -> Result<Option<BoardList>, ListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = lists::table
            .find(id.get())
            .select(ListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_list).transpose()
    }

    async fn update(&self, list: &BoardList) -> Result<BoardList, ListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ListUpdate {
            name: list.name.as_str(),
            status: list.status.as_str(),
        };
        let stored: ListRow = diesel::update(lists::table.find(list.id.get()))
            .set(&changes)
            .returning(ListRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_list(stored)
    }

    async fn delete(&self, id: ListId) -> Result<(), ListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(lists::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        if removed == 0 {
            return Err(ListPersistenceError::query("record not found"));
        }
        Ok(())
    }

    async fn list_all_with_items(&self) -> Result<Vec<ListWithItems>, ListPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let list_rows: Vec<ListRow> = lists::table
            .order(lists::id.asc())
            .select(ListRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let item_rows: Vec<ItemRow> = ItemRow::belonging_to(&list_rows)
            .order(items::id.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let grouped = item_rows.grouped_by(&list_rows);

        list_rows
            .into_iter()
            .zip(grouped)
            .map(|(list_row, item_rows)| {
                let list = row_to_list(list_row)?;
                let items = item_rows.into_iter().map(row_to_item).collect();
                Ok(ListWithItems { list, items })
            })
            .collect()
    }
}
