//! Account procedures: register, login, logout and the user directory.
//!
//! Password hashing and verification are CPU-bound, so they run on the
//! blocking pool rather than inside the request task.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AccountService, CredentialError, CredentialService, LoginOutcome, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, Identity, LoginCredentials, NewUser, Password, PasswordDigest, Registration,
    RequestContext, User, UserId,
};

/// Lifetime of a session token.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Message for registrations that collide with an existing username.
pub const USER_EXISTS: &str = "User already exists";
/// Message for any failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Account service implementing the [`AccountService`] driving port.
#[derive(Clone)]
pub struct AccountServiceImpl<U> {
    users: Arc<U>,
    credentials: Arc<dyn CredentialService>,
    clock: Arc<dyn Clock>,
}

impl<U> AccountServiceImpl<U> {
    /// Create a new service.
    pub fn new(users: Arc<U>, credentials: Arc<dyn CredentialService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            credentials,
            clock,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => Error::user_exists(USER_EXISTS),
    }
}

fn map_credential_error(error: CredentialError) -> Error {
    Error::internal(format!("credential service error: {error}"))
}

fn logged<T>(result: Result<T, Error>, procedure: &'static str) -> Result<T, Error> {
    if let Err(err) = &result
        && err.code().is_redacted()
    {
        error!(procedure, error = %err, "procedure failed");
    }
    result
}

impl<U> AccountServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn hash_password(&self, password: Password) -> Result<PasswordDigest, Error> {
        let credentials = Arc::clone(&self.credentials);
        tokio::task::spawn_blocking(move || credentials.hash_password(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_credential_error)
    }

    async fn verify_password(&self, password: Password, digest: PasswordDigest) -> Result<bool, Error> {
        let credentials = Arc::clone(&self.credentials);
        tokio::task::spawn_blocking(move || credentials.verify_password(&password, &digest))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
    }

    async fn register_inner(&self, registration: Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(registration.username().as_ref())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            debug!(username = %registration.username(), "registration rejected: username taken");
            return Err(Error::user_exists(USER_EXISTS));
        }

        let password_digest = self.hash_password(registration.password().clone()).await?;
        let new_user = NewUser {
            id: UserId::random(),
            username: registration.username().clone(),
            name: registration.name().clone(),
            password_digest,
            created_at: self.clock.utc(),
        };

        // The store re-checks uniqueness; a concurrent registration surfaces
        // as DuplicateUsername and maps to the same error as above.
        let user = self.users.create(&new_user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn login_inner(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected: unknown username");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };

        let matches = self
            .verify_password(credentials.password().clone(), account.password_digest)
            .await?;
        if !matches {
            debug!(user_id = %account.user.id(), "login rejected: password mismatch");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        }

        let identity = Identity {
            user_id: *account.user.id(),
            name: account.user.name().to_string(),
        };
        let token = self
            .credentials
            .issue_token(&identity, SESSION_TTL)
            .map_err(map_credential_error)?;
        info!(user_id = %identity.user_id, "login succeeded");
        Ok(LoginOutcome {
            token,
            user: account.user,
        })
    }
}

#[async_trait]
impl<U> AccountService for AccountServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        logged(self.register_inner(registration).await, "register")
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        logged(self.login_inner(credentials).await, "login")
    }

    async fn logout(&self, context: &RequestContext) -> Result<(), Error> {
        if let Some(identity) = context.identity() {
            info!(user_id = %identity.user_id, "logout acknowledged");
        }
        Ok(())
    }

    async fn list_users(&self, context: &RequestContext) -> Result<Vec<User>, Error> {
        context.require_identity()?;
        logged(self.users.list_all().await.map_err(map_user_error), "getUsers")
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
