//! Tests for error construction and trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
fn invalid_request_constructor_sets_code(base_error: Error) {
    assert_eq!(base_error.code(), ErrorCode::InvalidRequest);
    assert_eq!(base_error.message(), "bad");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let err = Error::new(ErrorCode::InternalError, "");
    assert_eq!(err.message(), "unexpected error");
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let err = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    assert_eq!(err.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn details_are_attached(base_error: Error) {
    let err = base_error.with_details(json!({"detail": "name is required"}));
    assert_eq!(
        err.details().and_then(|value| value.get("detail")),
        Some(&json!("name is required"))
    );
}

#[rstest]
#[case(400, ErrorCode::InvalidRequest)]
#[case(401, ErrorCode::Unauthorized)]
#[case(403, ErrorCode::Forbidden)]
#[case(404, ErrorCode::NotFound)]
#[case(409, ErrorCode::Conflict)]
#[case(422, ErrorCode::InvalidRequest)]
#[case(500, ErrorCode::InternalError)]
#[case(503, ErrorCode::ServiceUnavailable)]
fn http_status_maps_to_code(#[case] status: u16, #[case] expected: ErrorCode) {
    assert_eq!(ErrorCode::from_http_status(status), expected);
}
