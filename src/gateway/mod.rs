//! Generation gateway.
//!
//! The one entry point callers use: it resolves the session credential,
//! builds provider requests, runs them under the retry policy and turns
//! every provider failure into a [`GatewayError`].

mod request;
mod video;


pub use request::GenerateImageRequest;

use std::fmt;
use std::sync::Arc;

use crate::auth::{Credential, CredentialStore};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::provider::{GeminiProvider, GenerativeProvider};
use crate::retry::RetryExecutor;
use crate::types::gemini::{
    Content, GenerateContentRequest, GenerationConfig, ImageConfig, Part, PredictVideoRequest,
    VeoImage, VideoInstance, VideoParameters,
};
use crate::types::{AspectRatio, EncodedImage, VideoAspectRatio, VideoHandle};
use video::VideoJob;

/// Cheap to share behind an `Arc`; concurrent operations only share the
/// credential slot.
#[derive(Clone)]
pub struct GenerationGateway {
    config: GatewayConfig,
    credentials: CredentialStore,
    provider: Arc<dyn GenerativeProvider>,
    retry: RetryExecutor,
}

impl GenerationGateway {
    /// Gemini-backed gateway with the environment fallback credential, if any.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let provider = GeminiProvider::new(&config)?;
        Ok(Self::with_provider(
            config,
            CredentialStore::from_env(),
            Arc::new(provider),
        ))
    }

    /// [`GatewayConfig::from_env`] plus [`GenerationGateway::new`].
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(GatewayConfig::from_env())
    }

    pub fn with_provider(
        config: GatewayConfig,
        credentials: CredentialStore,
        provider: Arc<dyn GenerativeProvider>,
    ) -> Self {
        let retry = RetryExecutor::new(config.retry.clone());
        Self {
            config,
            credentials,
            provider,
            retry,
        }
    }

    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Replace the session credential. No format validation is done.
    pub fn set_credential(&self, token: impl Into<Credential>) {
        self.credentials.set_credential(token);
    }

    pub fn clear_credential(&self) {
        self.credentials.clear_credential();
    }

    /// Generate an image with the full image model.
    pub async fn generate_image(
        &self,
        request: GenerateImageRequest,
    ) -> Result<EncodedImage, GatewayError> {
        let credential = self.credentials.resolve_or_fail()?;

        let mut parts = Vec::with_capacity(2);
        if let Some(image) = request.source_image().await {
            parts.push(Part::image(&image));
        }
        parts.push(Part::text(request.prompt));

        let body = GenerateContentRequest {
            contents: vec![Content { role: None, parts }],
            generation_config: Some(GenerationConfig {
                response_modalities: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: Some(request.aspect_ratio.as_str().to_string()),
                    image_size: Some(request.resolution.as_str().to_string()),
                }),
            }),
        };

        tracing::debug!(
            model = %self.config.image_model,
            resolution = %request.resolution,
            aspect_ratio = %request.aspect_ratio,
            "Generating image"
        );
        self.generate_content(&credential, &self.config.image_model, &body)
            .await
    }

    /// Structure-preserving edit with the lighter edit model.
    ///
    /// The input image is left untouched; resolution and aspect ratio follow
    /// the model's defaults.
    pub async fn edit_image(
        &self,
        image: &EncodedImage,
        prompt: &str,
    ) -> Result<EncodedImage, GatewayError> {
        let credential = self.credentials.resolve_or_fail()?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::image(image), Part::text(prompt)],
            }],
            generation_config: None,
        };

        tracing::debug!(model = %self.config.edit_model, "Editing image");
        self.generate_content(&credential, &self.config.edit_model, &body)
            .await
    }

    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<EncodedImage, GatewayError> {
        let provider = self.provider.as_ref();
        let response = self
            .retry
            .execute(move || provider.generate_content(credential, model, body))
            .await?;
        response
            .first_inline_image()
            .ok_or(GatewayError::NoImageProduced)
    }

    /// Animate `image` into a short cinematic clip.
    ///
    /// Submission is retried like any other call. The job is then polled
    /// until done or until the polling budget runs out, and the result is
    /// downloaded so the returned handle needs no credential.
    pub async fn generate_video(
        &self,
        image: &EncodedImage,
        aspect_ratio: AspectRatio,
    ) -> Result<VideoHandle, GatewayError> {
        let credential = self.credentials.resolve_or_fail()?;
        let video_ratio = VideoAspectRatio::from(aspect_ratio);

        let body = PredictVideoRequest {
            instances: vec![VideoInstance {
                prompt: self.config.video_prompt.clone(),
                image: Some(VeoImage::from(image)),
            }],
            parameters: VideoParameters {
                aspect_ratio: video_ratio.as_str().to_string(),
                resolution: self.config.video_resolution.clone(),
                sample_count: 1,
            },
        };

        let provider = self.provider.as_ref();
        let model = self.config.video_model.as_str();
        let credential_ref = &credential;
        let body_ref = &body;
        tracing::debug!(model = %model, aspect_ratio = %video_ratio, "Submitting video job");
        let operation = self
            .retry
            .execute(move || provider.submit_video(credential_ref, model, body_ref))
            .await?;

        let uri = VideoJob::new(provider, &credential, self.config.video, operation)
            .run()
            .await?;

        let media = provider.download(&credential, &uri).await?;
        if media.bytes.is_empty() {
            return Err(GatewayError::NoVideoProduced);
        }
        Ok(VideoHandle::new(media.mime_type, media.bytes))
    }
}

impl fmt::Debug for GenerationGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationGateway")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
