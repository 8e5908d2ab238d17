//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("authentication required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("you can only edit your own points"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("point not found"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_parts(error: Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (status, header, body) = response_parts(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "error": "Internal server error",
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_field_details(expected_trace_id: String) {
    let error = Error::invalid_request("password must be at least 6 characters")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"errors": {"password": ["password must be at least 6 characters"]}}));

    let (status, header, body) = response_parts(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(
        body["details"]["errors"]["password"][0],
        "password must be at least 6 characters"
    );
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_header() {
    let (status, header, body) = response_parts(Error::not_found("point not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn actix_errors_are_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[rstest]
fn domain_errors_survive_the_actix_round_trip() {
    let wrapped: actix_web::Error = Error::invalid_request("invalid JSON body").into();
    let err = Error::from(wrapped);

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "invalid JSON body");
}

#[rstest]
fn json_content_type_errors_become_invalid_requests() {
    let req = actix_web::test::TestRequest::default().to_http_request();
    let err = Error::from(json_error_handler(JsonPayloadError::ContentType, &req));

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "request body must be JSON");
}

#[given("a forbidden error code")]
fn a_forbidden_error_code() -> ErrorCode {
    ErrorCode::Forbidden
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 403 Forbidden")]
fn the_status_is_403_forbidden(status: StatusCode) {
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
fn forbidden_maps_to_403() {
    let code = a_forbidden_error_code();
    let status = the_adapter_maps_the_code_to_http_status(code);
    the_status_is_403_forbidden(status);
}

#[given("an internal error carrying a secret")]
fn an_internal_error_carrying_a_secret() -> Error {
    Error::internal("password=hunter2")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": true}))
}

#[when("the adapter redacts the client payload")]
fn the_adapter_redacts_the_client_payload(error: Error) -> Error {
    super::redact_if_internal(&error)
}

#[then("clients see the generic message with the original trace id")]
fn clients_see_the_generic_message(redacted: Error) {
    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(TRACE_ID));
    assert!(redacted.details().is_none());
}

#[rstest]
fn internal_errors_are_redacted_for_clients() {
    let error = an_internal_error_carrying_a_secret();
    let redacted = the_adapter_redacts_the_client_payload(error);
    clients_see_the_generic_message(redacted);
}
