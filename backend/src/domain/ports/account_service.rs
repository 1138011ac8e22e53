//! Driving port for account procedures: register, login, logout, getUsers.
//!
//! Inbound adapters call this port without knowing which record store or
//! credential scheme backs it, so HTTP tests can swap in a double.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials, Registration, RequestContext, User};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Signed session token and its advisory expiry.
    pub token: IssuedToken,
    /// The authenticated user, without digest.
    pub user: User,
}

/// Account use-cases.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. Fails with `UserExists` when the username is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Exchange credentials for a one-hour token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;

    /// Acknowledge a logout. Sessions are stateless, so nothing is revoked.
    async fn logout(&self, context: &RequestContext) -> Result<(), Error>;

    /// Every registered user.
    async fn list_users(&self, context: &RequestContext) -> Result<Vec<User>, Error>;
}
