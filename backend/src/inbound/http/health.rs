//! Health endpoints for orchestrators.
//!
//! Readiness reports which store backs the board so operators can tell an
//! ephemeral in-memory deployment from a PostgreSQL one at a glance.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Storage backing the board records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; records vanish on restart.
    Memory,
    /// PostgreSQL through the Diesel pool.
    Postgres,
}

/// Body returned by both probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProbeReport {
    /// `ready`, `starting` or `alive`.
    #[schema(example = "ready")]
    pub status: &'static str,
    pub store: StoreBackend,
}

/// Shared readiness flag plus the configured store.
pub struct HealthState {
    ready: AtomicBool,
    store: StoreBackend,
}

impl HealthState {
    /// Create a state that reports "starting" until [`Self::mark_ready`].
    pub fn new(store: StoreBackend) -> Self {
        Self {
            ready: AtomicBool::new(false),
            store,
        }
    }

    /// Mark the listener as bound and the store as reachable.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn store(&self) -> StoreBackend {
        self.store
    }

    fn report(&self, status: &'static str, ok: bool) -> HttpResponse {
        let mut response = if ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(ProbeReport {
                status,
                store: self.store,
            })
    }
}

/// Readiness probe. 200 once the store and listener are initialised, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = ProbeReport),
        (status = 503, description = "Server is still starting", body = ProbeReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if state.is_ready() {
        state.report("ready", true)
    } else {
        state.report("starting", false)
    }
}

/// Liveness probe. Answers 200 whenever the worker can run a handler.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive", body = ProbeReport)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.report("alive", true)
}
