//! User account model.
//!
//! Users are created once at registration and never edited afterwards. The
//! password digest is deliberately absent from [`User`]; it travels only in
//! [`UserAccount`] between the credential service and the record store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Minimum length of a username, see [`text_len`].
pub const USERNAME_MIN: usize = 3;
/// Minimum length of a display name, see [`text_len`].
pub const DISPLAY_NAME_MIN: usize = 1;

/// Length as clients measure it: UTF-16 code units. Characters outside the
/// Basic Multilingual Plane count twice.
pub fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Validation errors raised by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The username was shorter than [`USERNAME_MIN`].
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    /// The display name was shorter than [`DISPLAY_NAME_MIN`].
    #[error("name must be at least {min} character")]
    DisplayNameTooShort { min: usize },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique, case-sensitive login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if text_len(&username) < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if text_len(&name) < DISPLAY_NAME_MIN {
            return Err(UserValidationError::DisplayNameTooShort {
                min: DISPLAY_NAME_MIN,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public view of a registered user.
///
/// ## Invariants
/// - Never carries the password digest, so it is always safe to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "ann")]
    username: Username,
    #[schema(value_type = String, example = "Ann A")]
    name: DisplayName,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, username: Username, name: DisplayName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            name,
            created_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name shown to other users.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Stored password digest in PHC string form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by the credential service or read from storage.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Digest text for verification or persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// A user together with their password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public user record.
    pub user: User,
    /// Digest checked at login.
    pub password_digest: PasswordDigest,
}

/// Values needed to create a user record; the store assigns nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Identifier minted by the registering service.
    pub id: UserId,
    /// Requested login name.
    pub username: Username,
    /// Display name.
    pub name: DisplayName,
    /// Digest of the chosen password.
    pub password_digest: PasswordDigest,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Public view of the user once stored.
    pub fn to_user(&self) -> User {
        User::new(
            self.id,
            self.username.clone(),
            self.name.clone(),
            self.created_at,
        )
    }
}
