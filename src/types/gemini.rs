//! Gemini REST payloads.
//!
//! Official docs:
//! - https://ai.google.dev/gemini-api/docs/image-generation
//! - https://ai.google.dev/gemini-api/docs/video

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::image::EncodedImage;

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One content part. Exactly one payload field is set on parts we build;
/// parts we receive may carry fields we ignore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none", rename = "inlineData")]
    pub inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn image(image: &EncodedImage) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
            ..Default::default()
        }
    }
}

/// Base64 inline payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// `models/{model}:generateContent` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    pub generation_config: Option<GenerationConfig>,
}

/// Configuration options for model generation and outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseModalities")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "imageConfig")]
    pub image_config: Option<ImageConfig>,
}

/// Image generation configuration for Gemini image models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none", rename = "aspectRatio")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "imageSize")]
    pub image_size: Option<String>,
}

/// `generateContent` response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "promptFeedback")]
    pub prompt_feedback: Option<Value>,
}

impl GenerateContentResponse {
    /// First part, in candidate order, carrying inline image bytes.
    pub fn first_inline_image(&self) -> Option<EncodedImage> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.inline_data.as_ref().filter(|d| !d.data.is_empty()))
            .map(|d| EncodedImage::new(d.mime_type.clone(), d.data.clone()))
    }
}

/// Candidate completion item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// `models/{model}:predictLongRunning` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictVideoRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInstance {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<VeoImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeoImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

impl From<&EncodedImage> for VeoImage {
    fn from(image: &EncodedImage) -> Self {
        Self {
            bytes_base64_encoded: image.data.clone(),
            mime_type: image.mime_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub aspect_ratio: String,
    pub resolution: String,
    pub sample_count: u32,
}

/// Long-running operation resource returned by submission and status fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongRunningOperation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl LongRunningOperation {
    /// Download reference of the first generated video, if any.
    pub fn video_uri(&self) -> Option<String> {
        let response = self.response.as_ref()?;
        let paths = [
            "/generateVideoResponse/generatedSamples/0/video/uri",
            "/generateVideoResponse/generatedSamples/0/videoUri",
            "/generatedVideos/0/video/uri",
        ];
        paths
            .iter()
            .find_map(|path| response.pointer(path).and_then(Value::as_str))
            .filter(|uri| !uri.is_empty())
            .map(str::to_string)
    }
}
