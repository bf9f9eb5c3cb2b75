//! Type Conversions for ProviderError
//!
//! Transport and decoding failures become provider errors so they flow
//! through the same retry and classification path as HTTP failures.

use super::provider::ProviderError;

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // Download URLs carry the API key as a query parameter.
        let err = err.without_url();
        let mut out = Self::new(err.to_string());
        if let Some(status) = err.status() {
            out.status = Some(status.as_u16());
        }
        out
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("failed to parse provider response: {err}"))
    }
}
