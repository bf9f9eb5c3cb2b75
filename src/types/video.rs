//! Video outputs.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::image::AspectRatio;
use crate::error::GatewayError;

/// The two aspect ratios the video model supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoAspectRatio {
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl VideoAspectRatio {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }
}

impl From<AspectRatio> for VideoAspectRatio {
    /// Portrait-leaning inputs (`9:16`, `3:4`) map to `9:16`, everything else to `16:9`.
    fn from(ratio: AspectRatio) -> Self {
        if ratio.is_portrait() {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}

impl fmt::Display for VideoAspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downloaded video bytes, playable without any provider credential.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoHandle {
    id: Uuid,
    mime_type: String,
    bytes: Bytes,
}

impl VideoHandle {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "video/webm" => "webm",
            "video/quicktime" => "mov",
            _ => "mp4",
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.bytes)
        )
    }

    /// Write the video into `dir` as `<id>.<ext>` and return the path.
    pub async fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, GatewayError> {
        let path = dir
            .as_ref()
            .join(format!("{}.{}", self.id, self.file_extension()));
        tokio::fs::write(&path, &self.bytes).await.map_err(|e| {
            GatewayError::InvalidInput(format!(
                "failed to write video to {}: {e}",
                path.display()
            ))
        })?;
        Ok(path)
    }
}

impl fmt::Debug for VideoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoHandle")
            .field("id", &self.id)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
