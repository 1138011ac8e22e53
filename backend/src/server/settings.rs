//! Server settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a configuration file or a
//! `TASKBOARD_*` environment variable.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use taskboard::domain::{ActorPolicy, ActorPolicyParseError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid TASKBOARD_BIND_ADDR '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The actor policy is not recognised.
    #[error("invalid TASKBOARD_ACTOR_POLICY: {0}")]
    ActorPolicy(#[from] ActorPolicyParseError),
}

/// Configuration values controlling the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKBOARD")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
    /// `client` trusts the body's `userId`; `verified` uses the token subject.
    pub actor_policy: Option<String>,
}

impl ServerSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Configured pool size.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size
    }

    /// Configured actor policy, falling back to [`ActorPolicy::ClientSupplied`].
    pub fn actor_policy(&self) -> Result<ActorPolicy, SettingsError> {
        self.actor_policy
            .as_deref()
            .map_or(Ok(ActorPolicy::default()), str::parse)
            .map_err(SettingsError::from)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "TASKBOARD_BIND_ADDR",
        "TASKBOARD_DATABASE_URL",
        "TASKBOARD_DB_POOL_SIZE",
        "TASKBOARD_ACTOR_POLICY",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("taskboard")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_pool_size(), 10);
        assert_eq!(
            settings.actor_policy().expect("default policy"),
            ActorPolicy::ClientSupplied
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TASKBOARD_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "TASKBOARD_DATABASE_URL",
                Some("postgres://localhost/board".to_owned()),
            ),
            ("TASKBOARD_DB_POOL_SIZE", Some("4".to_owned())),
            ("TASKBOARD_ACTOR_POLICY", Some("verified".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/board"));
        assert_eq!(settings.db_pool_size(), 4);
        assert_eq!(
            settings.actor_policy().expect("valid policy"),
            ActorPolicy::VerifiedIdentity
        );
    }

    #[rstest]
    fn invalid_values_are_reported() {
        let _guard = lock_env([
            ("TASKBOARD_BIND_ADDR", Some("localhost".to_owned())),
            ("TASKBOARD_DATABASE_URL", Some("   ".to_owned())),
            ("TASKBOARD_DB_POOL_SIZE", None),
            ("TASKBOARD_ACTOR_POLICY", Some("token".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert_eq!(settings.database_url(), None);
        assert!(matches!(
            settings.actor_policy(),
            Err(SettingsError::ActorPolicy(_))
        ));
    }
}
