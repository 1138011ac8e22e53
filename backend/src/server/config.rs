//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use taskboard::domain::ActorPolicy;
use taskboard::inbound::http::health::StoreBackend;
use taskboard::outbound::credentials::TokenSecret;
use taskboard::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) actor_policy: ActorPolicy,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret, actor_policy: ActorPolicy) -> Self {
        Self {
            bind_addr,
            token_secret,
            actor_policy,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, the server stores users, lists and items in PostgreSQL
    /// instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Store the server will wire: PostgreSQL when a pool is attached.
    #[must_use]
    pub fn store_backend(&self) -> StoreBackend {
        if self.db_pool.is_some() {
            StoreBackend::Postgres
        } else {
            StoreBackend::Memory
        }
    }
}
