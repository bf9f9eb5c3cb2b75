//! Provider failure classification.
//!
//! Every failure caught at a provider call site passes through [`classify`]
//! before the caller sees it.

use super::provider::ProviderError;
use super::types::GatewayError;

const AUTHORIZATION_MARKERS: [&str; 4] = [
    "Requested entity was not found",
    "PERMISSION_DENIED",
    "The caller does not have permission",
    "403",
];

/// Whether the failure signals a rejected or unauthorized credential.
pub fn is_authorization_failure(error: &ProviderError) -> bool {
    if error.status == Some(403) || error.code == Some(403) {
        return true;
    }
    if error
        .provider_status
        .as_deref()
        .is_some_and(|status| status.contains("PERMISSION_DENIED"))
    {
        return true;
    }
    AUTHORIZATION_MARKERS
        .iter()
        .any(|marker| error.message.contains(marker))
}

/// Map a raw provider failure onto the user-facing taxonomy.
pub fn classify(error: ProviderError) -> GatewayError {
    tracing::error!(
        status = ?error.status,
        code = ?error.code,
        provider_status = ?error.provider_status,
        message = %error.message,
        "Gemini API call failed"
    );

    if is_authorization_failure(&error) {
        return GatewayError::AuthorizationError {
            details: error.to_string(),
        };
    }

    GatewayError::OperationFailed(error.to_string())
}

impl From<ProviderError> for GatewayError {
    fn from(error: ProviderError) -> Self {
        classify(error)
    }
}
