use crate::types::{AspectRatio, EncodedImage, ImageResolution, UploadedFile};

/// Input for [`GenerationGateway::generate_image`](super::GenerationGateway::generate_image).
///
/// At most one source image is sent. When both a raw file and an encoded
/// image are set the raw file is used; with neither the request is text-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub raw_file: Option<UploadedFile>,
    pub encoded_image: Option<EncodedImage>,
    pub resolution: ImageResolution,
    pub aspect_ratio: AspectRatio,
}

impl GenerateImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_raw_file(mut self, file: UploadedFile) -> Self {
        self.raw_file = Some(file);
        self
    }

    pub fn with_encoded_image(mut self, image: EncodedImage) -> Self {
        self.encoded_image = Some(image);
        self
    }

    pub const fn with_resolution(mut self, resolution: ImageResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub const fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// The image that will actually be sent, encoding the raw file if needed.
    pub(crate) async fn source_image(&self) -> Option<EncodedImage> {
        match (&self.raw_file, &self.encoded_image) {
            (Some(file), _) => Some(file.encode().await),
            (None, Some(image)) => Some(image.clone()),
            (None, None) => None,
        }
    }
}
