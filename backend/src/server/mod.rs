//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use taskboard::Trace;
#[cfg(debug_assertions)]
use taskboard::doc::ApiDoc;
use taskboard::inbound::http::health::{HealthState, live, ready};
use taskboard::inbound::http::rpc_scope;
use taskboard::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(rpc_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with the bind address, token secret,
///   actor policy and optional database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use taskboard::domain::ActorPolicy;
    use taskboard::outbound::credentials::TokenSecret;

    fn dependencies() -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("literal address"),
            TokenSecret::new(b"server-wiring-secret-0123456789ab".to_vec()),
            ActorPolicy::VerifiedIdentity,
        );
        let health_state = web::Data::new(HealthState::new(config.store_backend()));
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(&config),
        }
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[actix_web::test]
    async fn probes_are_mounted(#[case] path: &str) {
        let app = actix_test::init_service(build_app(dependencies())).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn procedures_are_mounted_under_the_rpc_prefix() {
        let app = actix_test::init_service(build_app(dependencies())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/rpc/register")
            .set_json(json!({ "username": "ann", "password": "secret1", "name": "Ann A" }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["message"], "User registered successfully");
    }
}
