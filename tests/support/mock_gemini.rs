//! Shared helpers for tests that run the real HTTP provider against wiremock.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use archrender::{
    CredentialStore, EncodedImage, GatewayConfig, GeminiProvider, GenerationGateway, RetryPolicy,
    VideoPollConfig,
};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

/// Config pointed at the mock server, with millisecond-scale retry and polling.
pub fn fast_config(server: &MockServer) -> GatewayConfig {
    GatewayConfig::default()
        .with_base_url(server.uri())
        .with_timeout(10)
        .with_retry(
            RetryPolicy::new()
                .with_max_attempts(3)
                .with_initial_delay(Duration::from_millis(10)),
        )
        .with_video_polling(VideoPollConfig::new(
            Duration::from_millis(20),
            Duration::from_secs(2),
        ))
}

pub fn gateway(config: GatewayConfig, api_key: Option<&str>) -> GenerationGateway {
    let provider = GeminiProvider::new(&config).unwrap();
    let credentials = CredentialStore::new(None);
    if let Some(key) = api_key {
        credentials.set_credential(key);
    }
    GenerationGateway::with_provider(config, credentials, Arc::new(provider))
}

pub fn sketch() -> EncodedImage {
    EncodedImage::from_bytes("image/jpeg", b"sketch-bytes")
}

pub fn image_body(image: &EncodedImage) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Here is the render." },
                    { "inlineData": { "mimeType": image.mime_type, "data": image.data } }
                ]
            },
            "finishReason": "STOP"
        }]
    })
}

pub fn error_body(code: u16, message: &str, status: &str) -> Value {
    json!({ "error": { "code": code, "message": message, "status": status } })
}
