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
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({ "code": "invalid_request", "message": "bad" });

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("valid payload deserialises")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn entity_not_found_names_entity_and_key() {
    let error = Error::entity_not_found(EntityKind::Mount, "42");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.detail_str("entity"), Some("Mount"));
    assert_eq!(error.detail_str("key"), Some("42"));
    assert_eq!(error.detail_str("field"), Some("id"));
}

#[rstest]
fn entity_not_found_by_records_lookup_field() {
    let error = Error::entity_not_found_by(EntityKind::AccountSettings, "u-1", "userId");

    assert_eq!(error.detail_str("field"), Some("userId"));
    assert!(error.message().contains("userId"));
}

#[rstest]
fn serialises_with_camel_case_and_skips_empty_fields() {
    let error = Error::forbidden("denied");
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(value, json!({ "code": "forbidden", "message": "denied" }));
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({ "code": "not_found", "message": " " });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
