//! Gateway configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";
pub const DEFAULT_VIDEO_RESOLUTION: &str = "720p";
pub const DEFAULT_VIDEO_PROMPT: &str = "A cinematic slow architectural drone sweep around this building, realistic materials, soft natural lighting, high detail.";

/// Polling cadence and wall-clock budget for long-running video jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoPollConfig {
    /// Wait between status fetches
    pub poll_interval: Duration,
    /// Budget measured from submission
    pub timeout: Duration,
}

impl Default for VideoPollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            timeout: Duration::from_secs(5 * 60),
        }
    }
}

impl VideoPollConfig {
    pub const fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }
}

/// Everything the gateway needs besides the credential.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL for the Gemini API
    pub base_url: String,
    /// Model used for full image generation
    pub image_model: String,
    /// Lighter model used for structure-preserving edits
    pub edit_model: String,
    /// Video model
    pub video_model: String,
    /// Prompt sent with every video job
    pub video_prompt: String,
    /// Video output resolution
    pub video_resolution: String,
    /// HTTP timeout in seconds
    pub timeout: Option<u64>,
    pub retry: RetryPolicy,
    pub video: VideoPollConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            edit_model: DEFAULT_EDIT_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            video_prompt: DEFAULT_VIDEO_PROMPT.to_string(),
            video_resolution: DEFAULT_VIDEO_RESOLUTION.to_string(),
            timeout: Some(120),
            retry: RetryPolicy::default(),
            video: VideoPollConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with `GEMINI_BASE_URL` overriding the endpoint when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL")
            && !base_url.trim().is_empty()
        {
            config.base_url = base_url.trim().to_string();
        }
        config
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_edit_model(mut self, model: impl Into<String>) -> Self {
        self.edit_model = model.into();
        self
    }

    pub fn with_video_model(mut self, model: impl Into<String>) -> Self {
        self.video_model = model.into();
        self
    }

    pub fn with_video_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.video_prompt = prompt.into();
        self
    }

    /// Set HTTP timeout
    pub const fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub const fn with_video_polling(mut self, video: VideoPollConfig) -> Self {
        self.video = video;
        self
    }
}
