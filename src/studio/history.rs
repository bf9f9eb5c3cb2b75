//! Ordered record of every image a session produced.

use chrono::{DateTime, Utc};

use crate::types::EncodedImage;

const FILE_LABEL_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub image: EncodedImage,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(image: EncodedImage, label: impl Into<String>) -> Self {
        Self {
            image,
            label: label.into(),
            created_at: Utc::now(),
        }
    }

    /// `render-{n}-{label}.{ext}` with `n` 1-based and the label reduced to
    /// at most 20 alphanumeric/underscore characters.
    pub fn download_file_name(&self, index: usize) -> String {
        let label: String = self
            .label
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .take(FILE_LABEL_CHARS)
            .collect();
        let ext = match self.image.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        };
        format!("render-{}-{label}.{ext}", index + 1)
    }
}

/// Entries are append-only except for [`RenderHistory::undo`], which drops
/// the newest one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderHistory {
    entries: Vec<HistoryEntry>,
}

impl RenderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: EncodedImage, label: impl Into<String>) {
        self.entries.push(HistoryEntry::new(image, label));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the newest entry and return the one that is now newest.
    /// With fewer than two entries nothing changes and `None` is returned.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
