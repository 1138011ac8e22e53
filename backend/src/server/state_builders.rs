//! Builders wiring repositories, credentials and services into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use taskboard::domain::ports::{
    CredentialService, ItemRepository, ListRepository, UserRepository,
};
use taskboard::domain::{AccountServiceImpl, ActorPolicy, BoardServiceImpl, ContextResolver};
use taskboard::inbound::http::state::HttpState;
use taskboard::outbound::credentials::{JwtCredentialService, TokenSecret};
use taskboard::outbound::memory::InMemoryBoardStore;
use taskboard::outbound::persistence::{
    DieselItemRepository, DieselListRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Repositories backing the three record ports.
struct Stores<U, L, I> {
    users: Arc<U>,
    lists: Arc<L>,
    items: Arc<I>,
}

fn wire_services<U, L, I>(
    stores: Stores<U, L, I>,
    credentials: Arc<dyn CredentialService>,
    clock: Arc<dyn Clock>,
    policy: ActorPolicy,
) -> HttpState
where
    U: UserRepository + 'static,
    L: ListRepository + 'static,
    I: ItemRepository + 'static,
{
    let Stores {
        users,
        lists,
        items,
    } = stores;
    HttpState::new(
        Arc::new(AccountServiceImpl::new(users, credentials.clone(), clock)),
        Arc::new(BoardServiceImpl::new(lists, items, policy)),
        ContextResolver::new(credentials),
    )
}

fn build_credentials(secret: TokenSecret, clock: Arc<dyn Clock>) -> Arc<dyn CredentialService> {
    Arc::new(JwtCredentialService::new(secret, clock))
}

/// Build the shared HTTP state, using PostgreSQL when a pool is configured
/// and the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let credentials = build_credentials(config.token_secret.clone(), clock.clone());
    let policy = config.actor_policy;

    let state = match &config.db_pool {
        Some(pool) => wire_services(
            Stores {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                lists: Arc::new(DieselListRepository::new(pool.clone())),
                items: Arc::new(DieselItemRepository::new(pool.clone())),
            },
            credentials,
            clock,
            policy,
        ),
        None => {
            info!("no database configured; records are kept in memory");
            let store = Arc::new(InMemoryBoardStore::new());
            wire_services(
                Stores {
                    users: store.clone(),
                    lists: store.clone(),
                    items: store,
                },
                credentials,
                clock,
                policy,
            )
        }
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use taskboard::domain::ports::{AccountService as _, BoardService as _};
    use taskboard::domain::{
        ErrorCode, LoginCredentials, NOT_AUTHENTICATED, Procedure, Registration,
        RequestContext,
    };

    fn in_memory_config(policy: ActorPolicy) -> ServerConfig {
        ServerConfig::new(
            "127.0.0.1:0".parse().expect("literal address"),
            TokenSecret::new(b"state-builder-secret-0123456789ab".to_vec()),
            policy,
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn in_memory_state_issues_tokens_its_resolver_accepts() {
        let state = build_http_state(&in_memory_config(ActorPolicy::ClientSupplied));
        let registration =
            Registration::try_from_parts("ann", "secret1", "Ann A").expect("valid registration");
        state
            .accounts
            .register(registration)
            .await
            .expect("register succeeds");

        let outcome = state
            .accounts
            .login(LoginCredentials::new("ann", "secret1"))
            .await
            .expect("login succeeds");
        let header = format!("Bearer {}", outcome.token.token);

        let context = state
            .context
            .resolve(Procedure::GetLists, Some(&header))
            .expect("token accepted");
        assert!(matches!(context, RequestContext::Authenticated(_)));

        let lists = state.board.get_lists(&context).await.expect("lists");
        assert!(lists.is_empty());
    }

    #[rstest]
    fn tokens_signed_elsewhere_are_rejected() {
        let state = build_http_state(&in_memory_config(ActorPolicy::VerifiedIdentity));

        let error = state
            .context
            .resolve(Procedure::GetUsers, Some("Bearer forged.token.value"))
            .expect_err("foreign token rejected");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), NOT_AUTHENTICATED);
    }
}
