//! Types Module
//!
//! - `image`: resolutions, aspect ratios, encoded images and uploaded files
//! - `video`: video aspect ratios and downloaded video handles
//! - `gemini`: request/response payloads for the Gemini REST API

pub mod gemini;
pub mod image;
pub mod video;

pub use image::*;
pub use video::*;
