//! Board server entry-point: loads configuration, prepares storage and serves
//! the procedure endpoints, health probes and OpenAPI docs.

mod server;

use actix_web::web;
use mockable::{DefaultEnv, Env};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use taskboard::inbound::http::health::HealthState;
use taskboard::inbound::http::token_config::{BuildMode, token_settings_from_env};
use taskboard::outbound::credentials::TokenSecret;
use taskboard::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Signing secret from `JWT_SECRET`, checked against the build mode.
fn load_token_secret<E: Env>(env: &E, mode: BuildMode) -> std::io::Result<TokenSecret> {
    let token_settings = token_settings_from_env(env, mode).map_err(std::io::Error::other)?;
    Ok(TokenSecret::new(token_settings.secret.as_slice()))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let actor_policy = settings.actor_policy().map_err(std::io::Error::other)?;

    let token_secret = load_token_secret(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;

    let mut config = ServerConfig::new(bind_addr, token_secret, actor_policy);
    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_size()))
                .await
                .map_err(std::io::Error::other)?;
            info!("database pool ready");
            config = config.with_db_pool(pool);
        }
        None => info!("TASKBOARD_DATABASE_URL not set; using the in-memory store"),
    }

    info!(%bind_addr, ?actor_policy, "starting server");
    let health_state = web::Data::new(HealthState::new(config.store_backend()));
    let server = create_server(health_state, config)?;
    server.await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use taskboard::inbound::http::token_config::DEVELOPMENT_SECRET;

    fn env_with_secret(secret: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string().returning(move |name| match name {
            "JWT_SECRET" => secret.map(str::to_owned),
            _ => None,
        });
        env
    }

    #[rstest]
    fn debug_builds_fall_back_to_the_development_secret() {
        let secret =
            load_token_secret(&env_with_secret(None), BuildMode::Debug).expect("dev fallback");
        assert_eq!(secret.len(), DEVELOPMENT_SECRET.len());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("too-short"))]
    fn release_builds_refuse_weak_secrets(#[case] secret: Option<&'static str>) {
        let err = load_token_secret(&env_with_secret(secret), BuildMode::Release)
            .err()
            .expect("release needs a strong secret");
        assert!(err.to_string().contains("JWT_SECRET"), "{err}");
    }

    #[rstest]
    fn release_builds_use_the_configured_secret() {
        let configured = "0123456789abcdef0123456789abcdef";
        let secret = load_token_secret(&env_with_secret(Some(configured)), BuildMode::Release)
            .expect("strong secret");
        assert_eq!(secret.len(), configured.len());
    }
}
