//! MIME Type Detection Utilities
//!
//! Magic-number detection (via the `infer` crate) with an extension-based
//! fallback for the image and video formats the gateway handles.

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file path or URL (extension-based)
pub fn guess_mime_from_path_or_url(path_or_url: &str) -> Option<String> {
    let extension = path_or_url
        .rsplit('.')
        .next()?
        .split('?') // Handle query parameters in URLs
        .next()?
        .to_lowercase();

    let mime = match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",

        _ => return None,
    };

    Some(mime.to_string())
}

/// Combined guess: prefer bytes, fall back to extension, otherwise octet-stream
pub fn guess_mime(bytes: Option<&[u8]>, path_or_url: Option<&str>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(p) = path_or_url
        && let Some(m) = guess_mime_from_path_or_url(p)
    {
        return m;
    }
    "application/octet-stream".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_from_path() {
        assert_eq!(
            guess_mime_from_path_or_url("sketch.jpg"),
            Some("image/jpeg".to_string())
        );
        assert_eq!(
            guess_mime_from_path_or_url("IMAGE.PNG"),
            Some("image/png".to_string())
        );
        assert_eq!(
            guess_mime_from_path_or_url("https://example.com/files/abc.mp4?alt=media"),
            Some("video/mp4".to_string())
        );
        assert_eq!(guess_mime_from_path_or_url("notes.txt"), None);
    }

    #[test]
    fn test_guess_mime_combined() {
        // Bytes win over the extension
        let png_bytes = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(guess_mime(Some(png_bytes), Some("file.jpg")), "image/png");

        assert_eq!(guess_mime(None, Some("render.webp")), "image/webp");
        assert_eq!(guess_mime(None, None), "application/octet-stream");
        assert_eq!(
            guess_mime(Some(&b"plain"[..]), Some("file.xyz")),
            "application/octet-stream"
        );
    }
}
