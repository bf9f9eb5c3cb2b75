//! Gemini REST implementation of [`GenerativeProvider`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::headers::build_gemini_headers;
use super::{DownloadedMedia, GenerativeProvider};
use crate::auth::Credential;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, ProviderError};
use crate::types::gemini::{
    GenerateContentRequest, GenerateContentResponse, LongRunningOperation, PredictVideoRequest,
};
use crate::utils::mime::guess_mime_from_bytes;

const FALLBACK_VIDEO_MIME: &str = "video/mp4";

/// Gemini API client over `reqwest`.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    http_client: reqwest::Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let http_client = builder.build().map_err(|e| {
            GatewayError::OperationFailed(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self::with_http_client(http_client, &config.base_url))
    }

    pub fn with_http_client(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn model_url(&self, model: &str, action: &str) -> String {
        let model = model.trim_start_matches("models/");
        format!("{}/models/{model}:{action}", self.base_url)
    }

    async fn post_json<B, R>(
        &self,
        credential: &Credential,
        url: &str,
        body: &B,
    ) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        tracing::debug!(url = %url, "Gemini POST");
        let response = self
            .http_client
            .post(url)
            .headers(build_gemini_headers(credential)?)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ProviderError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::from_response(
            status.as_u16(),
            &text,
            status.canonical_reason(),
        ));
    }
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.model_url(model, "generateContent");
        self.post_json(credential, &url, request).await
    }

    async fn submit_video(
        &self,
        credential: &Credential,
        model: &str,
        request: &PredictVideoRequest,
    ) -> Result<LongRunningOperation, ProviderError> {
        let url = self.model_url(model, "predictLongRunning");
        self.post_json(credential, &url, request).await
    }

    async fn get_operation(
        &self,
        credential: &Credential,
        name: &str,
    ) -> Result<LongRunningOperation, ProviderError> {
        let url = format!("{}/{}", self.base_url, name.trim_start_matches('/'));
        tracing::debug!(operation = %name, "Gemini operation status");
        let response = self
            .http_client
            .get(&url)
            .headers(build_gemini_headers(credential)?)
            .send()
            .await?;
        read_json(response).await
    }

    async fn download(
        &self,
        credential: &Credential,
        uri: &str,
    ) -> Result<DownloadedMedia, ProviderError> {
        let response = self
            .http_client
            .get(uri)
            .query(&[("key", credential.expose())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_response(
                status.as_u16(),
                &text,
                status.canonical_reason(),
            ));
        }

        let header_mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty() && v != "application/octet-stream");
        let bytes = response.bytes().await?;
        let mime_type = header_mime
            .or_else(|| guess_mime_from_bytes(&bytes))
            .unwrap_or_else(|| FALLBACK_VIDEO_MIME.to_string());

        tracing::debug!(bytes = bytes.len(), mime = %mime_type, "Downloaded generated media");
        Ok(DownloadedMedia { mime_type, bytes })
    }
}
