//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

/// Record access for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username is taken, even if a prior lookup found it free.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch an account, digest included, by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Every registered user, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
