//! Retry and classification of provider failures over HTTP.

use archrender::{ErrorKind, GatewayError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "support/mock_gemini.rs"]
mod support;

use support::*;

const EDIT_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

#[tokio::test]
async fn overloaded_503_is_retried_then_succeeds() {
    let server = MockServer::start().await;
    let edited = archrender::EncodedImage::from_bytes("image/png", b"edited");

    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(error_body(
            503,
            "The model is overloaded. Please try again later.",
            "UNAVAILABLE",
        )))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body(&edited)))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let image = gateway.edit_image(&sketch(), "edit").await.unwrap();
    assert_eq!(image, edited);
}

#[tokio::test]
async fn exhausted_retries_report_the_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(error_body(
            503,
            "The model is overloaded. Please try again later.",
            "UNAVAILABLE",
        )))
        .expect(3)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let err = gateway.edit_image(&sketch(), "edit").await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::OperationFailed("The model is overloaded. Please try again later.".into())
    );
}

#[tokio::test]
async fn bare_500_without_body_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let err = gateway.edit_image(&sketch(), "edit").await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::OperationFailed("Internal Server Error".into())
    );
}

#[tokio::test]
async fn permission_denied_is_authorization_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_body(
            403,
            "The caller does not have permission",
            "PERMISSION_DENIED",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some("bad-key"));
    let err = gateway.edit_image(&sketch(), "edit").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert!(!err.is_user_retryable());
}

#[tokio::test]
async fn entity_not_found_is_authorization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_body(
            404,
            "Requested entity was not found.",
            "NOT_FOUND",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let err = gateway.edit_image(&sketch(), "edit").await.unwrap_err();
    assert!(matches!(err, GatewayError::AuthorizationError { .. }));
}

#[tokio::test]
async fn quota_exhausted_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_body(
            429,
            "Resource has been exhausted (e.g. check quota).",
            "RESOURCE_EXHAUSTED",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let err = gateway.edit_image(&sketch(), "edit").await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::OperationFailed("Resource has been exhausted (e.g. check quota).".into())
    );
}

#[tokio::test]
async fn invalid_argument_keeps_provider_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EDIT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            400,
            "Unable to process input image.",
            "INVALID_ARGUMENT",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let err = gateway.edit_image(&sketch(), "edit").await.unwrap_err();
    assert_eq!(err.to_string(), "operation failed: Unable to process input image.");
}
