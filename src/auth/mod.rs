//! Credential handling.
//!
//! The gateway authenticates with a single opaque API key. [`CredentialStore`]
//! holds the key set at runtime and falls back to one captured from the
//! environment when the store was built.

mod credential;

pub use credential::*;
