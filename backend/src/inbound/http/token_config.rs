//! Session token configuration parsing and validation.
//!
//! The signing secret comes from `JWT_SECRET`. Release builds refuse to start
//! without a secret of at least [`TOKEN_SECRET_MIN_LEN`] bytes; debug builds
//! fall back to a fixed development secret and say so loudly.

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

pub(crate) const SECRET_ENV: &str = "JWT_SECRET";
/// Minimum secret length accepted by release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
/// Development-only secret used when `JWT_SECRET` is absent in debug builds.
pub const DEVELOPMENT_SECRET: &str = "default_secret";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require an explicit, strong secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskboard::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where the signing secret came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SecretSource {
    /// Read from `JWT_SECRET`.
    Environment,
    /// The development fallback.
    DevelopmentDefault,
}

/// Token settings derived from the environment.
pub struct TokenSettings {
    /// HMAC signing secret, wiped on drop.
    pub secret: Zeroizing<Vec<u8>>,
    /// Origin of `secret`.
    pub source: SecretSource,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret_len", &self.secret.len())
            .field("source", &self.source)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TokenConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// The secret is too short for release builds.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use taskboard::inbound::http::token_config::{
///     BuildMode, SecretSource, token_settings_from_env,
/// };
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid secret");
/// assert_eq!(settings.source, SecretSource::Environment);
/// assert_eq!(settings.secret.len(), 32);
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let raw = env
        .string(SECRET_ENV)
        .map(Zeroizing::new)
        .filter(|value| !value.is_empty());

    let Some(raw) = raw else {
        if mode.is_debug() {
            warn!("JWT_SECRET not set; using the development secret (dev only)");
            return Ok(TokenSettings {
                secret: Zeroizing::new(DEVELOPMENT_SECRET.as_bytes().to_vec()),
                source: SecretSource::DevelopmentDefault,
            });
        }
        return Err(TokenConfigError::MissingEnv { name: SECRET_ENV });
    };

    let length = raw.len();
    if length < TOKEN_SECRET_MIN_LEN {
        if !mode.is_debug() {
            return Err(TokenConfigError::SecretTooShort {
                name: SECRET_ENV,
                length,
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
        warn!(
            length,
            min_len = TOKEN_SECRET_MIN_LEN,
            "JWT_SECRET shorter than the release minimum"
        );
    }

    Ok(TokenSettings {
        secret: Zeroizing::new(raw.as_bytes().to_vec()),
        source: SecretSource::Environment,
    })
}

#[cfg(test)]
mod tests;
