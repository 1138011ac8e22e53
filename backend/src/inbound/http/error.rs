//! HTTP adapter mapping for domain errors.
//!
//! Only request-shape and authentication failures reach the transport as
//! HTTP errors. Procedure failures travel inside the response envelope (see
//! [`super::envelope`]), so the statuses below matter mostly for the
//! validation and context-building stages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, UNKNOWN_ERROR_MESSAGE};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::UserExists => StatusCode::CONFLICT,
        ErrorCode::NotFoundOrForbidden => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact(error: &Error) -> Error {
    if !error.code().is_redacted() {
        return error.clone();
    }
    let mut redacted = Error::new(error.code(), UNKNOWN_ERROR_MESSAGE);
    if let Some(id) = error.trace_id() {
        redacted = redacted.with_trace_id(id.to_owned());
    }
    redacted
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact(self))
    }
}
