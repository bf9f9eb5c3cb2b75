//! Error Handling Module
//!
//! Two layers of errors live here:
//! - [`ProviderError`]: the raw failure shape observed at the provider boundary
//!   (HTTP status, nested provider code/status, message, JSON body).
//! - [`GatewayError`]: the small user-facing taxonomy every gateway operation
//!   returns. Conversion from the former to the latter goes through
//!   [`classify`], the single place that decides what the caller sees.
//!
//! # Example
//!
//! ```rust,ignore
//! use archrender::error::{classify, ErrorKind, ProviderError};
//!
//! let raw = ProviderError::new("").with_code(403);
//! assert_eq!(classify(raw).kind(), ErrorKind::Authorization);
//! ```

mod classify;
mod conversions;
pub mod provider;
pub mod types;

pub use classify::*;
pub use provider::*;
pub use types::*;
