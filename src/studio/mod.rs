//! Studio session.
//!
//! A [`Studio`] holds one project's state on top of a [`GenerationGateway`]:
//! the uploaded sketch, the base render every follow-up works from, the image
//! currently shown, an optional cinematic video and the render history.
//!
//! Follow-up operations (style, view, material, free-form edit, video) always
//! start from the base render, never from the image currently shown. A failed
//! operation leaves images and history untouched.

mod history;

pub use history::{HistoryEntry, RenderHistory};

use std::path::Path;

use crate::catalog::{
    self, ArchitecturalStyle, FLOOR_PLAN_PROMPT, Material, MaterialTarget, ViewAngle,
};
use crate::error::GatewayError;
use crate::gateway::{GenerateImageRequest, GenerationGateway};
use crate::types::{AspectRatio, EncodedImage, ImageResolution, UploadedFile, VideoHandle};
use crate::utils::validate_upload;

pub const RENDER_LABEL: &str = "3D Render";
pub const FLOOR_PLAN_LABEL: &str = "Floor Plan";
const EDIT_LABEL_CHARS: usize = 20;

#[derive(Debug, Clone)]
pub struct Studio {
    gateway: GenerationGateway,
    sketch: Option<UploadedFile>,
    resolution: ImageResolution,
    aspect_ratio: AspectRatio,
    base_image: Option<EncodedImage>,
    current_image: Option<EncodedImage>,
    current_video: Option<VideoHandle>,
    history: RenderHistory,
}

impl Studio {
    pub fn new(gateway: GenerationGateway) -> Self {
        Self {
            gateway,
            sketch: None,
            resolution: ImageResolution::default(),
            aspect_ratio: AspectRatio::default(),
            base_image: None,
            current_image: None,
            current_video: None,
            history: RenderHistory::new(),
        }
    }

    pub const fn gateway(&self) -> &GenerationGateway {
        &self.gateway
    }

    pub const fn sketch(&self) -> Option<&UploadedFile> {
        self.sketch.as_ref()
    }

    pub const fn base_image(&self) -> Option<&EncodedImage> {
        self.base_image.as_ref()
    }

    pub const fn current_image(&self) -> Option<&EncodedImage> {
        self.current_image.as_ref()
    }

    pub const fn current_video(&self) -> Option<&VideoHandle> {
        self.current_video.as_ref()
    }

    pub const fn history(&self) -> &RenderHistory {
        &self.history
    }

    pub const fn resolution(&self) -> ImageResolution {
        self.resolution
    }

    pub const fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn set_resolution(&mut self, resolution: ImageResolution) {
        self.resolution = resolution;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Validate and store a new sketch. All previous results are discarded.
    pub fn load_sketch(&mut self, file: UploadedFile) -> Result<(), GatewayError> {
        validate_upload(&file)?;
        tracing::debug!(
            file = file.file_name.as_deref().unwrap_or("<memory>"),
            mime = %file.mime_type,
            bytes = file.size(),
            "Sketch loaded"
        );
        self.sketch = Some(file);
        self.clear_results();
        Ok(())
    }

    /// [`Studio::load_sketch`] from a file on disk.
    pub async fn open_sketch(&mut self, path: impl AsRef<Path>) -> Result<(), GatewayError> {
        let file = UploadedFile::open(path).await?;
        self.load_sketch(file)
    }

    /// Render the sketch. The result becomes the new base image.
    pub async fn render(&mut self, prompt: &str) -> Result<&EncodedImage, GatewayError> {
        let sketch = self
            .sketch
            .clone()
            .ok_or_else(|| GatewayError::InvalidInput("upload a sketch first".into()))?;

        let request = GenerateImageRequest::new(prompt)
            .with_raw_file(sketch)
            .with_resolution(self.resolution)
            .with_aspect_ratio(self.aspect_ratio);
        let image = self.gateway.generate_image(request).await?;

        self.base_image = Some(image.clone());
        Ok(self.show(image, RENDER_LABEL))
    }

    /// Re-skin the base render's facade, keeping its structure.
    pub async fn change_style(
        &mut self,
        style: &ArchitecturalStyle,
    ) -> Result<&EncodedImage, GatewayError> {
        let base = self.require_base()?;
        let image = self.gateway.edit_image(&base, style.prompt).await?;
        Ok(self.show(image, style.name))
    }

    /// Re-render the base image from another camera position.
    pub async fn change_view(&mut self, view: &ViewAngle) -> Result<&EncodedImage, GatewayError> {
        let base = self.require_base()?;
        let request = GenerateImageRequest::new(catalog::view_change_prompt(view))
            .with_encoded_image(base)
            .with_resolution(self.resolution)
            .with_aspect_ratio(self.aspect_ratio);
        let image = self.gateway.generate_image(request).await?;
        Ok(self.show(image, view.name))
    }

    /// Swap the finish of one building element.
    pub async fn simulate_material(
        &mut self,
        target: MaterialTarget,
        material: &Material,
    ) -> Result<&EncodedImage, GatewayError> {
        let base = self.require_base()?;
        let prompt = catalog::material_prompt(target, material);
        let image = self.gateway.edit_image(&base, &prompt).await?;
        let label = format!("{} → {}", target.as_str(), material.value);
        Ok(self.show(image, label))
    }

    /// Free-form edit instructions applied to the base render.
    pub async fn apply_edit(&mut self, instructions: &str) -> Result<&EncodedImage, GatewayError> {
        if instructions.trim().is_empty() {
            return Err(GatewayError::InvalidInput(
                "edit instructions must not be empty".into(),
            ));
        }
        let base = self.require_base()?;
        let image = self.gateway.edit_image(&base, instructions).await?;
        Ok(self.show(image, edit_label(instructions)))
    }

    /// Typical-floor plan derived from the base render.
    pub async fn floor_plan(&mut self) -> Result<&EncodedImage, GatewayError> {
        let base = self.require_base()?;
        let request = GenerateImageRequest::new(FLOOR_PLAN_PROMPT)
            .with_encoded_image(base)
            .with_resolution(self.resolution)
            .with_aspect_ratio(self.aspect_ratio);
        let image = self.gateway.generate_image(request).await?;
        Ok(self.show(image, FLOOR_PLAN_LABEL))
    }

    /// Drone-sweep video of the base render in the session aspect ratio.
    pub async fn make_cinematic(&mut self) -> Result<&VideoHandle, GatewayError> {
        let base = self.require_base()?;
        let video = self
            .gateway
            .generate_video(&base, self.aspect_ratio)
            .await?;
        Ok(&*self.current_video.insert(video))
    }

    /// Drop the newest history entry and show the previous one. The current
    /// video stays. Returns `false` (and changes nothing) with fewer than two
    /// entries.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo() else {
            return false;
        };
        self.current_image = Some(previous.image.clone());
        true
    }

    /// Show a history entry without changing the history itself.
    pub fn select(&mut self, index: usize) -> Result<&EncodedImage, GatewayError> {
        let entry = self.history.get(index).ok_or_else(|| {
            GatewayError::InvalidInput(format!(
                "no history entry {index} (history has {})",
                self.history.len()
            ))
        })?;
        self.current_video = None;
        Ok(&*self.current_image.insert(entry.image.clone()))
    }

    /// Start a new project. The gateway and its credential are kept.
    pub fn reset(&mut self) {
        self.sketch = None;
        self.resolution = ImageResolution::default();
        self.aspect_ratio = AspectRatio::default();
        self.clear_results();
    }

    /// Reset and forget the runtime credential.
    pub fn sign_out(&mut self) {
        self.reset();
        self.gateway.clear_credential();
    }

    fn clear_results(&mut self) {
        self.base_image = None;
        self.current_image = None;
        self.current_video = None;
        self.history.clear();
    }

    fn require_base(&self) -> Result<EncodedImage, GatewayError> {
        self.base_image
            .clone()
            .ok_or_else(|| GatewayError::InvalidInput("render the sketch first".into()))
    }

    fn show(&mut self, image: EncodedImage, label: impl Into<String>) -> &EncodedImage {
        self.current_video = None;
        self.history.push(image.clone(), label);
        self.current_image.insert(image)
    }
}

/// First 20 characters of the instructions, with `...` when cut.
fn edit_label(instructions: &str) -> String {
    let mut chars = instructions.chars();
    let head: String = chars.by_ref().take(EDIT_LABEL_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
