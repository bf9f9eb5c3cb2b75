//! Video submission, polling and download over HTTP.

use std::time::Duration;

use archrender::{AspectRatio, GatewayError, VideoPollConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "support/mock_gemini.rs"]
mod support;

use support::*;

const SUBMIT_PATH: &str = "/models/veo-3.1-fast-generate-preview:predictLongRunning";
const OPERATION: &str = "models/veo-3.1-fast-generate-preview/operations/op-42";
const MP4: &[u8] = &[
    0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'm', b'p', b'4', b'2', 0x00, 0x00, 0x00, 0x00,
];

fn done_operation(server: &MockServer) -> serde_json::Value {
    json!({
        "name": OPERATION,
        "done": true,
        "response": {
            "@type": "type.googleapis.com/google.ai.generativelanguage.v1beta.PredictLongRunningResponse",
            "generateVideoResponse": {
                "generatedSamples": [{
                    "video": { "uri": format!("{}/v1beta/files/vid-1:download?alt=media", server.uri()) }
                }]
            }
        }
    })
}

async fn mount_submit(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(header("x-goog-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": OPERATION })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn video_is_submitted_polled_and_downloaded() {
    let server = MockServer::start().await;
    let source = sketch();

    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "instances": [{
                "image": { "bytesBase64Encoded": source.data, "mimeType": "image/jpeg" }
            }],
            "parameters": { "aspectRatio": "9:16", "resolution": "720p", "sampleCount": 1 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": OPERATION })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .and(header("x-goog-api-key", API_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": OPERATION, "done": false })),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(done_operation(&server)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1beta/files/vid-1:download"))
        .and(query_param("alt", "media"))
        .and(query_param("key", API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(MP4),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let video = gateway
        .generate_video(&source, AspectRatio::Portrait)
        .await
        .unwrap();

    assert_eq!(video.mime_type(), "video/mp4");
    assert_eq!(video.bytes().as_ref(), MP4);
    assert!(video.to_data_uri().starts_with("data:video/mp4;base64,"));

    let dir = tempfile::tempdir().unwrap();
    let written = video.write_to(dir.path()).await.unwrap();
    assert_eq!(tokio::fs::read(&written).await.unwrap(), MP4);
}

#[tokio::test]
async fn video_times_out_when_job_never_finishes() {
    let server = MockServer::start().await;
    mount_submit(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": OPERATION, "done": false })),
        )
        .mount(&server)
        .await;

    let config = fast_config(&server).with_video_polling(VideoPollConfig::new(
        Duration::from_millis(20),
        Duration::from_millis(150),
    ));
    let gateway = gateway(config, Some(API_KEY));
    let err = gateway
        .generate_video(&sketch(), AspectRatio::Square)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GatewayError::VideoTimeout {
            timeout: Duration::from_millis(150)
        }
    );

    let polls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert!(polls >= 1);

    // Abandoned jobs are not polled again.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let later = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(polls, later);
}

#[tokio::test]
async fn finished_job_without_samples_is_no_video_produced() {
    let server = MockServer::start().await;
    mount_submit(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "done": true,
            "response": { "generateVideoResponse": { "raiMediaFilteredCount": 1 } }
        })))
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let err = gateway
        .generate_video(&sketch(), AspectRatio::Square)
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::NoVideoProduced);
}

#[tokio::test]
async fn operation_error_is_classified() {
    let server = MockServer::start().await;
    mount_submit(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/{OPERATION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": OPERATION,
            "done": true,
            "error": { "code": 3, "message": "Video generation failed due to safety filters." }
        })))
        .mount(&server)
        .await;

    let gateway = gateway(fast_config(&server), Some(API_KEY));
    let err = gateway
        .generate_video(&sketch(), AspectRatio::Widescreen)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::OperationFailed("Video generation failed due to safety filters.".into())
    );
}
