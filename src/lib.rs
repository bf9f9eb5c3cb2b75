//! # archrender - Architectural Rendering on Generative Media Models
//!
//! archrender turns architectural sketches into photorealistic renders,
//! re-skins and re-frames them, and animates the result into a short
//! cinematic clip, all through Google's Gemini image and Veo video models.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **One gateway**: [`GenerationGateway`] owns the session credential and
//!   exposes image generation, image editing and video generation.
//! - **Retries built in**: overloaded/unavailable responses are retried with
//!   exponential backoff; everything else fails fast.
//! - **Small error surface**: every failure is a [`GatewayError`] with a kind
//!   and a user-facing hint; raw provider errors never leak out.
//! - **Long-running video**: jobs are polled on `tokio::time` with a fixed
//!   budget, and the finished clip is downloaded into memory.
//! - **Studio sessions**: [`Studio`] layers a render history, undo and the
//!   design catalog on top of the gateway.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use archrender::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = GenerationGateway::from_env()?;
//!     gateway.set_credential("your-api-key");
//!
//!     let mut studio = Studio::new(gateway);
//!     studio.open_sketch("sketch.png").await?;
//!     studio.render(catalog::INITIAL_PROMPT).await?;
//!     studio.change_style(catalog::style("bauhaus").unwrap()).await?;
//!
//!     let video = studio.make_cinematic().await?;
//!     let path = video.write_to(".").await?;
//!     println!("video written to {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod retry;
pub mod studio;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use auth::{Credential, CredentialStore};
pub use config::{GatewayConfig, VideoPollConfig};
pub use error::{ErrorKind, GatewayError, ProviderError};
pub use gateway::{GenerateImageRequest, GenerationGateway};
pub use provider::{GeminiProvider, GenerativeProvider};
pub use retry::{RetryExecutor, RetryPolicy};
pub use studio::Studio;
pub use types::{
    AspectRatio, EncodedImage, ImageResolution, UploadedFile, VideoAspectRatio, VideoHandle,
};

/// Everything a typical caller needs.
pub mod prelude {
    pub use crate::catalog::{self, MaterialTarget};
    pub use crate::studio::{HistoryEntry, Studio};
    pub use crate::{
        AspectRatio, Credential, EncodedImage, ErrorKind, GatewayConfig, GatewayError,
        GenerateImageRequest, GenerationGateway, ImageResolution, UploadedFile, VideoHandle,
    };
}
