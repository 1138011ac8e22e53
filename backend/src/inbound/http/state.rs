//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ContextResolver;
use crate::domain::ports::{AccountService, BoardService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub board: Arc<dyn BoardService>,
    pub context: ContextResolver,
}

impl HttpState {
    /// Construct state from the two driving ports and a context resolver.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use taskboard::domain::{AccountServiceImpl, ActorPolicy, BoardServiceImpl, ContextResolver};
    /// use taskboard::inbound::http::state::HttpState;
    /// use taskboard::outbound::credentials::{JwtCredentialService, TokenSecret};
    /// use taskboard::outbound::memory::InMemoryBoardStore;
    ///
    /// let store = Arc::new(InMemoryBoardStore::new());
    /// let credentials = Arc::new(JwtCredentialService::new(
    ///     TokenSecret::new(b"0123456789abcdef0123456789abcdef".to_vec()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(
    ///     Arc::new(AccountServiceImpl::new(
    ///         store.clone(),
    ///         credentials.clone(),
    ///         Arc::new(DefaultClock),
    ///     )),
    ///     Arc::new(BoardServiceImpl::new(store.clone(), store, ActorPolicy::default())),
    ///     ContextResolver::new(credentials),
    /// );
    /// let _board = state.board.clone();
    /// ```
    pub fn new(
        accounts: Arc<dyn AccountService>,
        board: Arc<dyn BoardService>,
        context: ContextResolver,
    ) -> Self {
        Self {
            accounts,
            board,
            context,
        }
    }
}
