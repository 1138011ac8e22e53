//! Authentication primitives: login credentials, registration input and the
//! identity carried by a verified session token.
//!
//! Inbound adapters build these from raw strings before calling a service, so
//! services never see unvalidated registration input. Plaintext passwords are
//! held in [`Zeroizing`] buffers and wiped on drop.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::user::{DISPLAY_NAME_MIN, USERNAME_MIN, text_len};
use crate::domain::{DisplayName, UserId, Username};

/// Minimum number of characters in a newly chosen password.
pub const PASSWORD_MIN: usize = 6;

/// Plaintext password kept in a zeroising buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a caller-supplied password.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Expose the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Login credentials.
///
/// Login accepts any username and password shape; a value that could never
/// have been registered simply fails verification like any other mismatch.
///
/// # Examples
/// ```
/// use taskboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("ann", "secret1");
/// assert_eq!(creds.username(), "ann");
/// assert_eq!(creds.password().expose(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Password::new(password),
        }
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Field-level failures for registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Username shorter than the minimum.
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    /// Password shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// Display name was empty.
    #[error("name must be at least {min} character")]
    NameTooShort { min: usize },
}

impl RegistrationValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UsernameTooShort { .. } => "username",
            Self::PasswordTooShort { .. } => "password",
            Self::NameTooShort { .. } => "name",
        }
    }

    /// Stable validation code for the failure.
    pub fn code(&self) -> &'static str {
        "too_short"
    }
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Password,
    name: DisplayName,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// Lengths are counted in UTF-16 code units, not bytes.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)
            .map_err(|_| RegistrationValidationError::UsernameTooShort { min: USERNAME_MIN })?;
        if text_len(password) < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let name = DisplayName::new(name)
            .map_err(|_| RegistrationValidationError::NameTooShort { min: DISPLAY_NAME_MIN })?;

        Ok(Self {
            username,
            password: Password::new(password),
            name,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Chosen password.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }
}

/// Identity asserted by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Authenticated user.
    pub user_id: UserId,
    /// Display name captured at login.
    pub name: String,
}

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact signed token string.
    pub token: String,
    /// Advisory expiry as milliseconds since the Unix epoch.
    pub expires_at_epoch_millis: i64,
}
