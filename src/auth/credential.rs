use std::fmt;
use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};

use crate::error::GatewayError;

/// Environment variables consulted, in order, for a fallback credential.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// An API key for the provider. `Debug` never prints the secret.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Empty or whitespace-only tokens authenticate nothing.
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Single active credential slot plus an optional environment fallback.
///
/// Cloning yields another handle to the same slot. Writes are last-write-wins.
#[derive(Clone, Default)]
pub struct CredentialStore {
    runtime: Arc<RwLock<Option<Credential>>>,
    fallback: Option<Credential>,
}

impl CredentialStore {
    /// A store with no runtime credential and the given fallback.
    pub fn new(fallback: Option<Credential>) -> Self {
        Self {
            runtime: Arc::new(RwLock::new(None)),
            fallback,
        }
    }

    /// A store whose fallback is read from the process environment once, now.
    pub fn from_env() -> Self {
        let fallback = CREDENTIAL_ENV_VARS.iter().find_map(|name| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(Credential::new)
        });
        if fallback.is_some() {
            tracing::debug!("Using API key from environment as fallback credential");
        }
        Self::new(fallback)
    }

    /// Replace the runtime credential. A blank token clears the slot.
    pub fn set_credential(&self, token: impl Into<Credential>) {
        let credential = Some(token.into()).filter(|c| !c.is_blank());
        let mut slot = self.runtime.write().unwrap_or_else(|e| e.into_inner());
        *slot = credential;
    }

    /// Drop the runtime credential. The environment fallback, if any, remains.
    pub fn clear_credential(&self) {
        let mut slot = self.runtime.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// The runtime credential, else the environment fallback.
    pub fn get_credential(&self) -> Option<Credential> {
        let slot = self.runtime.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
            .filter(|c| !c.is_blank())
            .or_else(|| self.fallback.clone())
    }

    pub fn has_credential(&self) -> bool {
        self.get_credential().is_some()
    }

    /// Resolve a credential or fail before any network activity.
    pub fn resolve_or_fail(&self) -> Result<Credential, GatewayError> {
        self.get_credential().ok_or(GatewayError::NotAuthenticated)
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let runtime_set = self
            .runtime
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false);
        f.debug_struct("CredentialStore")
            .field("runtime_set", &runtime_set)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}
