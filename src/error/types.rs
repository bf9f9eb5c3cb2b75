use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by every gateway operation.
///
/// Transient provider failures never show up here while retry budget remains;
/// once it is exhausted they arrive as [`GatewayError::OperationFailed`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// No runtime credential and no environment fallback.
    #[error("API key is not set; complete authentication first")]
    NotAuthenticated,

    /// The provider rejected the credential (403, permission denied, entity not found).
    #[error(
        "API key error: the key is invalid or lacks permission; select a key from a project with billing enabled"
    )]
    AuthorizationError { details: String },

    /// A well-formed response carried no inline image.
    #[error("the provider did not return an image")]
    NoImageProduced,

    /// A completed video job carried no download reference.
    #[error("the video result did not contain a download link")]
    NoVideoProduced,

    /// The video job did not complete within the polling budget.
    #[error("video generation timed out after {}s; please try again", .timeout.as_secs())]
    VideoTimeout { timeout: Duration },

    /// Any other provider failure, carrying the original message.
    #[error("operation failed: {0}")]
    OperationFailed(String),

    /// Caller-supplied input was rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse error kind for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotAuthenticated,
    Authorization,
    NoImage,
    NoVideo,
    VideoTimeout,
    OperationFailed,
    InvalidInput,
}

impl GatewayError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthenticated => ErrorKind::NotAuthenticated,
            Self::AuthorizationError { .. } => ErrorKind::Authorization,
            Self::NoImageProduced => ErrorKind::NoImage,
            Self::NoVideoProduced => ErrorKind::NoVideo,
            Self::VideoTimeout { .. } => ErrorKind::VideoTimeout,
            Self::OperationFailed(_) => ErrorKind::OperationFailed,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Short hint on what the user should do next.
    pub const fn guidance(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotAuthenticated => "Sign in or enter an API key before generating.",
            ErrorKind::Authorization => "Re-enter an API key from a project with billing enabled.",
            ErrorKind::NoImage | ErrorKind::NoVideo | ErrorKind::VideoTimeout => {
                "Try the operation again."
            }
            ErrorKind::OperationFailed => "Check the message above and try again.",
            ErrorKind::InvalidInput => "Fix the input and submit it again.",
        }
    }

    /// Whether asking the user to simply run the operation again is reasonable.
    pub const fn is_user_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NoImage
                | ErrorKind::NoVideo
                | ErrorKind::VideoTimeout
                | ErrorKind::OperationFailed
        )
    }
}
