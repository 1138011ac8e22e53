//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure here is raised before a procedure body runs and becomes an
//! HTTP 400 carrying `details: {field, code}`.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, ListStatus, RegistrationValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidStatus,
    MalformedBody,
    MalformedQuery,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidStatus => "invalid_status",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for wire field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const STATUS: FieldName = FieldName::new("status");

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn parse_status(value: &str, field: FieldName) -> Result<ListStatus, Error> {
    value.parse::<ListStatus>().map_err(|err| {
        field_error(
            field.as_str(),
            ValidationCode::InvalidStatus.as_str(),
            err.to_string(),
        )
    })
}

pub(crate) fn parse_optional_status(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<ListStatus>, Error> {
    value.map(|raw| parse_status(raw, field)).transpose()
}

pub(crate) fn map_registration_error(err: RegistrationValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    field_error(
        "body",
        ValidationCode::MalformedBody.as_str(),
        format!("request body is invalid: {err}"),
    )
    .into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    field_error(
        "query",
        ValidationCode::MalformedQuery.as_str(),
        format!("query string is invalid: {err}"),
    )
    .into()
}

/// JSON extractor configuration returning the standard error payload.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor configuration returning the standard error payload.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
