//! Extractor resolving the per-call authorisation context.
//!
//! The procedure is taken from the final path segment, so the extractor works
//! under any mount point. Unauthenticated calls to protected procedures stop
//! here with HTTP 401 and never reach the procedure body.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::domain::{Error, Procedure, RequestContext};
use crate::inbound::http::state::HttpState;

/// The classified caller of a procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    procedure: Procedure,
    context: RequestContext,
}

impl Caller {
    /// Procedure being invoked.
    pub fn procedure(&self) -> Procedure {
        self.procedure
    }

    /// Context handed to the procedure body.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }
}

fn procedure_from_path(path: &str) -> Result<Procedure, Error> {
    let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    name.parse::<Procedure>().map_err(|err| {
        error!(error = %err, "caller extractor mounted on a non-procedure route");
        Error::internal(err.to_string())
    })
}

fn resolve(req: &HttpRequest) -> Result<Caller, Error> {
    let procedure = procedure_from_path(req.path())?;
    let state = req.app_data::<web::Data<HttpState>>().ok_or_else(|| {
        error!("HTTP state missing from application data");
        Error::internal("HTTP state is not configured")
    })?;
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let context = state.context.resolve(procedure, authorization)?;
    Ok(Caller { procedure, context })
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}
