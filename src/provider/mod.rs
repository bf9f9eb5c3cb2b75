//! Provider boundary.
//!
//! [`GenerativeProvider`] is the narrow surface the gateway needs from a
//! generative-media backend. [`GeminiProvider`] talks to the Gemini REST API;
//! tests substitute scripted implementations.

mod gemini;
pub mod headers;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use bytes::Bytes;

use crate::auth::Credential;
use crate::error::ProviderError;
use crate::types::gemini::{
    GenerateContentRequest, GenerateContentResponse, LongRunningOperation, PredictVideoRequest,
};

/// Bytes fetched from a provider-hosted download reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedMedia {
    pub mime_type: String,
    pub bytes: Bytes,
}

/// Raw provider calls. Errors are returned unclassified; retry and
/// classification happen in the gateway.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// `models/{model}:generateContent`
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError>;

    /// `models/{model}:predictLongRunning`
    async fn submit_video(
        &self,
        credential: &Credential,
        model: &str,
        request: &PredictVideoRequest,
    ) -> Result<LongRunningOperation, ProviderError>;

    /// Fetch the current state of a long-running operation by name.
    async fn get_operation(
        &self,
        credential: &Credential,
        name: &str,
    ) -> Result<LongRunningOperation, ProviderError>;

    /// Download a generated artifact. The credential is attached by the provider.
    async fn download(
        &self,
        credential: &Credential,
        uri: &str,
    ) -> Result<DownloadedMedia, ProviderError>;
}
