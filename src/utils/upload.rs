//! Upload limits applied before a sketch reaches the gateway.

use crate::error::GatewayError;
use crate::types::UploadedFile;

/// Largest accepted upload, in megabytes.
pub const MAX_UPLOAD_SIZE_MB: usize = 20;
pub const MAX_UPLOAD_SIZE_BYTES: usize = MAX_UPLOAD_SIZE_MB * 1024 * 1024;

/// Reject files over the size limit or whose MIME type is not `image/*`.
pub fn validate_upload(file: &UploadedFile) -> Result<(), GatewayError> {
    if file.size() > MAX_UPLOAD_SIZE_BYTES {
        let size_mb = file.size() as f64 / 1024.0 / 1024.0;
        return Err(GatewayError::InvalidInput(format!(
            "file is too large; the limit is {MAX_UPLOAD_SIZE_MB}MB (current: {size_mb:.1}MB)"
        )));
    }
    if !file.mime_type.starts_with("image/") {
        return Err(GatewayError::InvalidInput(
            "only image files can be uploaded (JPG, PNG, WEBP, ...)".into(),
        ));
    }
    Ok(())
}
