//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn try_from_error_dto_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_owned(),
        trace_id: None,
        details: None,
    };

    let error = TraceId::scope(trace_id, async move {
        Error::try_from(dto).expect("conversion succeeds for valid payload without trace")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::Unauthorized, "unauthorized")]
#[case(ErrorCode::InvalidCredentials, "invalid_credentials")]
#[case(ErrorCode::UserExists, "user_exists")]
#[case(ErrorCode::NotFoundOrForbidden, "not_found_or_forbidden")]
#[case(ErrorCode::ServiceUnavailable, "service_unavailable")]
#[case(ErrorCode::InternalError, "internal_error")]
fn error_codes_serialise_as_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    let value = serde_json::to_value(code).expect("code serialises");
    assert_eq!(value, json!(expected));
}

#[rstest]
fn serialised_error_uses_camel_case_and_skips_empty_fields(expected_trace_id: String) {
    let error = Error::user_exists("User already exists").with_trace_id(expected_trace_id.clone());
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "user_exists",
            "message": "User already exists",
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "internal_error", "message": "  " }));
    assert!(result.is_err());
}

#[rstest]
#[case(Error::internal("pool exhausted"), "An unknown error occurred")]
#[case(Error::service_unavailable("db down"), "An unknown error occurred")]
#[case(
    Error::not_found_or_forbidden("List not found or user does not have permission"),
    "List not found or user does not have permission"
)]
#[case(Error::user_exists("User already exists"), "User already exists")]
fn public_message_redacts_internal_failures(#[case] error: Error, #[case] expected: &str) {
    assert_eq!(error.public_message(), expected);
}
