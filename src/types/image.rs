//! Image inputs and outputs.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::utils::mime::guess_mime;

/// MIME type assumed for base64 payloads that arrive without a data-URI prefix.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Output image size requested from the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageResolution {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageResolution {
    pub const ALL: [Self; 3] = [Self::OneK, Self::TwoK, Self::FourK];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

impl fmt::Display for ImageResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageResolution {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GatewayError::InvalidInput(format!("unsupported resolution: {s}")))
    }
}

/// Output aspect ratio requested from the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    pub const ALL: [Self; 5] = [
        Self::Square,
        Self::Widescreen,
        Self::Standard,
        Self::Portrait,
        Self::Tall,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Widescreen => "16:9",
            Self::Standard => "4:3",
            Self::Portrait => "3:4",
            Self::Tall => "9:16",
        }
    }

    /// Taller than wide.
    pub const fn is_portrait(&self) -> bool {
        matches!(self, Self::Portrait | Self::Tall)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| GatewayError::InvalidInput(format!("unsupported aspect ratio: {s}")))
    }
}

/// A base64 image payload with its MIME type. Interchangeable with a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Base64 payload without any data-URI prefix.
    pub data: String,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Parse `data:<mime>;base64,<payload>`.
    ///
    /// A bare base64 string is accepted and assumed to be PNG.
    pub fn from_data_uri(uri: &str) -> Result<Self, GatewayError> {
        let uri = uri.trim();
        let Some(rest) = uri.strip_prefix("data:") else {
            if uri.is_empty() {
                return Err(GatewayError::InvalidInput("empty image payload".into()));
            }
            return Ok(Self::new(DEFAULT_IMAGE_MIME, uri));
        };

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| GatewayError::InvalidInput("malformed data URI".into()))?;
        let Some(mime_type) = header.strip_suffix(";base64") else {
            return Err(GatewayError::InvalidInput(
                "data URI is not base64-encoded".into(),
            ));
        };
        if payload.is_empty() {
            return Err(GatewayError::InvalidInput("empty image payload".into()));
        }

        let mime_type = if mime_type.is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            mime_type
        };
        Ok(Self::new(mime_type, payload))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, GatewayError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| GatewayError::InvalidInput(format!("invalid base64 image data: {e}")))
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_data_uri())
    }
}

impl FromStr for EncodedImage {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_data_uri(s)
    }
}

/// A raw image file supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Read a file from disk, guessing its MIME type from content, then extension.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            GatewayError::InvalidInput(format!("failed to read file {}: {e}", path.display()))
        })?;
        let mime_type = guess_mime(Some(&bytes), path.to_str());
        let mut file = Self::new(mime_type, bytes);
        file.file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        Ok(file)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Base64-encode the file contents, keeping its MIME type.
    pub async fn encode(&self) -> EncodedImage {
        let bytes = self.bytes.clone();
        let mime_type = self.mime_type.clone();
        // Large uploads are encoded off the async workers.
        match tokio::task::spawn_blocking(move || EncodedImage::from_bytes(mime_type, &bytes)).await
        {
            Ok(encoded) => encoded,
            Err(_) => EncodedImage::from_bytes(self.mime_type.clone(), &self.bytes),
        }
    }
}
