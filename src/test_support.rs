//! Scripted provider used by unit tests.
//!
//! Each call pops the next scripted result; with an empty script the provider
//! falls back to a neutral answer (echo the input image, a pending operation,
//! a small MP4 payload). Every call is recorded with the credential it carried.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use tokio::time::Instant;

use crate::auth::{Credential, CredentialStore};
use crate::config::GatewayConfig;
use crate::error::ProviderError;
use crate::gateway::GenerationGateway;
use crate::provider::{DownloadedMedia, GenerativeProvider};
use crate::types::gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, LongRunningOperation,
    Part, PredictVideoRequest,
};
use crate::types::EncodedImage;

pub const TEST_OPERATION: &str = "models/veo-3.1-fast-generate-preview/operations/op-1";
pub const TEST_VIDEO_URI: &str = "https://example.com/v1beta/files/video-1:download?alt=media";
pub const MP4_HEADER: &[u8] = &[
    0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'm', b'p', b'4', b'2',
];

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateCall {
    pub credential: String,
    pub model: String,
    pub request: GenerateContentRequest,
}

#[derive(Default)]
pub struct ScriptedProvider {
    generate_script: Mutex<VecDeque<Result<GenerateContentResponse, ProviderError>>>,
    submit_script: Mutex<VecDeque<Result<LongRunningOperation, ProviderError>>>,
    operation_script: Mutex<VecDeque<Result<LongRunningOperation, ProviderError>>>,
    generate_calls: Mutex<Vec<GenerateCall>>,
    submit_calls: Mutex<Vec<PredictVideoRequest>>,
    poll_times: Mutex<Vec<Instant>>,
    poll_latency: Mutex<Option<Duration>>,
    downloads: Mutex<Vec<(String, String)>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_generate(&self, result: Result<GenerateContentResponse, ProviderError>) {
        self.generate_script.lock().unwrap().push_back(result);
    }

    pub fn push_submit(&self, result: Result<LongRunningOperation, ProviderError>) {
        self.submit_script.lock().unwrap().push_back(result);
    }

    pub fn push_operation(&self, result: Result<LongRunningOperation, ProviderError>) {
        self.operation_script.lock().unwrap().push_back(result);
    }

    /// `n` not-done status responses, then `last`.
    pub fn script_polls(&self, n: usize, last: LongRunningOperation) {
        for _ in 0..n {
            self.push_operation(Ok(pending_operation()));
        }
        self.push_operation(Ok(last));
    }

    /// Every status fetch takes `latency` before answering.
    pub fn set_poll_latency(&self, latency: Duration) {
        *self.poll_latency.lock().unwrap() = Some(latency);
    }

    pub fn generate_calls(&self) -> Vec<GenerateCall> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub fn submit_calls(&self) -> Vec<PredictVideoRequest> {
        self.submit_calls.lock().unwrap().clone()
    }

    pub fn poll_times(&self) -> Vec<Instant> {
        self.poll_times.lock().unwrap().clone()
    }

    /// `(credential, uri)` for every download.
    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.generate_calls.lock().unwrap().len()
            + self.submit_calls.lock().unwrap().len()
            + self.poll_times.lock().unwrap().len()
            + self.downloads.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        self.generate_calls.lock().unwrap().push(GenerateCall {
            credential: credential.expose().to_string(),
            model: model.to_string(),
            request: request.clone(),
        });
        if let Some(result) = self.generate_script.lock().unwrap().pop_front() {
            return result;
        }
        let echoed = request
            .contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| EncodedImage::new(d.mime_type.clone(), d.data.clone()));
        Ok(match echoed {
            Some(image) => image_response(&image),
            None => GenerateContentResponse::default(),
        })
    }

    async fn submit_video(
        &self,
        _credential: &Credential,
        _model: &str,
        request: &PredictVideoRequest,
    ) -> Result<LongRunningOperation, ProviderError> {
        self.submit_calls.lock().unwrap().push(request.clone());
        self.submit_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(pending_operation()))
    }

    async fn get_operation(
        &self,
        _credential: &Credential,
        name: &str,
    ) -> Result<LongRunningOperation, ProviderError> {
        assert_eq!(name, TEST_OPERATION);
        self.poll_times.lock().unwrap().push(Instant::now());
        let latency = *self.poll_latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.operation_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(pending_operation()))
    }

    async fn download(
        &self,
        credential: &Credential,
        uri: &str,
    ) -> Result<DownloadedMedia, ProviderError> {
        self.downloads
            .lock()
            .unwrap()
            .push((credential.expose().to_string(), uri.to_string()));
        Ok(DownloadedMedia {
            mime_type: "video/mp4".to_string(),
            bytes: Bytes::from_static(MP4_HEADER),
        })
    }
}

pub fn image_response(image: &EncodedImage) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part::text("Here you go"), Part::image(image)],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
        prompt_feedback: None,
    }
}

pub fn pending_operation() -> LongRunningOperation {
    LongRunningOperation {
        name: TEST_OPERATION.to_string(),
        ..Default::default()
    }
}

pub fn finished_operation() -> LongRunningOperation {
    LongRunningOperation {
        name: TEST_OPERATION.to_string(),
        done: true,
        response: Some(json!({
            "generateVideoResponse": {
                "generatedSamples": [{ "video": { "uri": TEST_VIDEO_URI } }]
            }
        })),
        error: None,
    }
}

pub fn overloaded() -> ProviderError {
    ProviderError::new("The model is overloaded. Please try again later.")
        .with_status(503)
        .with_code(503)
        .with_provider_status("UNAVAILABLE")
}

pub fn permission_denied() -> ProviderError {
    ProviderError::new("The caller does not have permission")
        .with_status(403)
        .with_code(403)
        .with_provider_status("PERMISSION_DENIED")
}

/// Gateway over `provider` with `key` as the runtime credential and no env fallback.
pub fn gateway_with(provider: Arc<ScriptedProvider>, key: Option<&str>) -> GenerationGateway {
    let credentials = CredentialStore::new(None);
    if let Some(key) = key {
        credentials.set_credential(key);
    }
    GenerationGateway::with_provider(GatewayConfig::default(), credentials, provider)
}
