//! PostgreSQL-backed `ItemRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ItemPersistenceError, ItemRepository};
use crate::domain::{Item, ItemId, ListId, NewItem, UserId};

use super::diesel_error_mapping::{DieselFailure, classify};
use super::models::{ItemRow, ItemUpdate, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::items;

/// Diesel implementation of [`ItemRepository`].
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemPersistenceError {
    ItemPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ItemPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => ItemPersistenceError::connection(message),
        DieselFailure::ForeignKey(constraint) => {
            ItemPersistenceError::missing_reference(constraint)
        }
        DieselFailure::Unique(constraint) => ItemPersistenceError::query(constraint),
        DieselFailure::Query(message) => ItemPersistenceError::query(message),
    }
}

pub(super) fn row_to_item(row: ItemRow) -> Item {
    Item {
        id: ItemId::new(row.id),
        name: row.name,
        description: row.description,
        list_id: ListId::new(row.list_id),
        owner_id: UserId::from_uuid(row.user_id),
    }
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn create(&self, item: &NewItem) -> Result<Item, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewItemRow {
            name: item.name.as_str(),
            description: item.description.as_deref(),
            list_id: item.list_id.get(),
            user_id: *item.owner_id.as_uuid(),
        };
        diesel::insert_into(items::table)
            .values(&row)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_item)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        items::table
            .find(id.get())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_item))
            .map_err(map_diesel_error)
    }

    async fn update(&self, item: &Item) -> Result<Item, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ItemUpdate {
            name: item.name.as_str(),
            description: item.description.as_deref(),
            list_id: item.list_id.get(),
        };
        diesel::update(items::table.find(item.id.get()))
            .set(&changes)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_item)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: ItemId) -> Result<(), ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(items::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            return Err(ItemPersistenceError::query("record not found"));
        }
        Ok(())
    }

    async fn delete_by_list_id(&self, list_id: ListId) -> Result<u64, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(items::table.filter(items::list_id.eq(list_id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }

    async fn list_by_list_id(&self, list_id: ListId) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ItemRow> = items::table
            .filter(items::list_id.eq(list_id.get()))
            .order(items::id.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_item).collect())
    }
}
