//! Gemini HTTP header helpers.
//!
//! Every JSON request carries `Content-Type: application/json`; the API key
//! travels in `x-goog-api-key` and is marked sensitive so it never shows up
//! in header debug output.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::auth::Credential;
use crate::error::ProviderError;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

pub fn build_gemini_headers(credential: &Credential) -> Result<HeaderMap, ProviderError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let api_key = credential.expose();
    if !api_key.is_empty() {
        let mut value = HeaderValue::from_str(api_key)
            .map_err(|e| ProviderError::new(format!("Invalid API key header value: {e}")))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
    }
    Ok(headers)
}
