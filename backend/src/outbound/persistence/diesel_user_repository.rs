//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    DisplayName, NewUser, PasswordDigest, User, UserAccount, UserId, Username,
};

use super::diesel_error_mapping::{DieselFailure, classify};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, username: Option<&str>) -> UserPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Unique(_) => {
            UserPersistenceError::duplicate_username(username.unwrap_or_default())
        }
        DieselFailure::ForeignKey(constraint) => UserPersistenceError::query(constraint),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let username = Username::new(row.username.as_str()).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored username fails validation");
        UserPersistenceError::query("stored user record is invalid")
    })?;
    let name = DisplayName::new(row.name.as_str()).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored display name fails validation");
        UserPersistenceError::query("stored user record is invalid")
    })?;
    Ok(UserAccount {
        user: User::new(UserId::from_uuid(row.id), username, name, row.created_at),
        password_digest: PasswordDigest::new(row.password_digest),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            name: user.name.as_ref(),
            password_digest: user.password_digest.as_str(),
            created_at: user.created_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(user.username.as_ref())))?;
        Ok(user.to_user())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(row.map(row_to_account).transpose()?.map(|account| account.user))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter()
            .map(|row| row_to_account(row).map(|account| account.user))
            .collect()
    }
}
