//! Unit coverage for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::conflict("Registration already exists.")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::invalid_state("past"), ErrorCode::InvalidState)]
#[case(Error::capacity_exceeded("full"), ErrorCode::CapacityExceeded)]
#[case(Error::conflict("dup"), ErrorCode::Conflict)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(ErrorCode::InvalidRequest, true)]
#[case(ErrorCode::NotFound, true)]
#[case(ErrorCode::InvalidState, true)]
#[case(ErrorCode::CapacityExceeded, true)]
#[case(ErrorCode::Conflict, true)]
#[case(ErrorCode::InternalError, false)]
fn client_error_classification(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_client_error(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_falls_back_to_generic_message() {
    let error = Error::new(ErrorCode::NotFound, "");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "resource not found");
}

#[rstest]
fn blank_trace_id_is_rejected(base_error: Error) {
    let result = base_error.try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn with_trace_id_keeps_previous_value_when_blank(base_error: Error) {
    let error = base_error.with_trace_id(TRACE_ID).with_trace_id("");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn store_failures_are_tagged() {
    let store = Error::store_failure("connection reset");
    let plain = Error::internal("boom");
    let detailed = Error::internal("boom").with_details(json!({ "source": "service" }));

    assert_eq!(store.code(), ErrorCode::InternalError);
    assert!(store.is_store_failure());
    assert!(!plain.is_store_failure());
    assert!(!detailed.is_store_failure());
}

#[rstest]
fn display_renders_message(base_error: Error) {
    assert_eq!(base_error.to_string(), "Registration already exists.");
}
