//! Raw provider failures.
//!
//! The provider does not guarantee one error shape: HTTP failures carry a
//! status plus a JSON envelope (`{"error":{"code","message","status"}}`),
//! long-running operations report `{"code","message"}`, and transport failures
//! only have a message. [`ProviderError`] holds whichever pieces were present.

use std::fmt;

use serde_json::{Value, json};

/// HTTP-like codes treated as transient provider overload/unavailability.
pub const TRANSIENT_CODES: [i64; 4] = [500, 502, 503, 504];

const TRANSIENT_MESSAGE_MARKERS: [&str; 5] = [
    "503",
    "overloaded",
    "UNAVAILABLE",
    "Too Many Requests",
    "Internal Server Error",
];

const TRANSIENT_SERIALIZED_MARKERS: [&str; 3] = ["503", "overloaded", "UNAVAILABLE"];

/// Whether a failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Overload or temporary unavailability; retried internally.
    Transient,
    /// Retrying the same request will not help.
    Terminal,
}

/// A failure observed at the provider boundary, before classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderError {
    /// HTTP status of the failed response, when one was received.
    pub status: Option<u16>,
    /// Nested provider code (`error.code`).
    pub code: Option<i64>,
    /// Provider status string (`error.status`, e.g. `PERMISSION_DENIED`).
    pub provider_status: Option<String>,
    /// Human-readable message, empty when the provider sent none.
    pub message: String,
    /// Raw JSON body, when the failure came with one.
    pub body: Option<Value>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub const fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_provider_status(mut self, status: impl Into<String>) -> Self {
        self.provider_status = Some(status.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Build from a non-success HTTP response.
    ///
    /// `reason` is the canonical reason phrase (e.g. `Service Unavailable`),
    /// used as the message when the body carries none.
    pub fn from_response(status: u16, body_text: &str, reason: Option<&str>) -> Self {
        let mut err = Self {
            status: Some(status),
            ..Default::default()
        };

        match serde_json::from_str::<Value>(body_text) {
            Ok(body) => {
                // Some Google endpoints wrap the envelope in a one-element array.
                let envelope = body
                    .get("error")
                    .or_else(|| body.pointer("/0/error"))
                    .cloned();
                if let Some(envelope) = envelope {
                    err.code = envelope.get("code").and_then(code_from_value);
                    err.provider_status = envelope
                        .get("status")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    if let Some(message) = envelope.get("message").and_then(Value::as_str) {
                        err.message = message.to_string();
                    }
                }
                err.body = Some(body);
            }
            Err(_) => {
                let trimmed = body_text.trim();
                if !trimmed.is_empty() {
                    err.message = trimmed.chars().take(500).collect();
                }
            }
        }

        if err.message.is_empty()
            && let Some(reason) = reason
        {
            err.message = reason.to_string();
        }
        err
    }

    /// Build from the `error` object of a finished long-running operation.
    pub fn from_operation_error(error: &Value) -> Self {
        let mut err = Self::new(
            error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        );
        err.code = error.get("code").and_then(code_from_value);
        err.provider_status = error
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_string);
        err.body = Some(error.clone());
        err
    }

    /// First numeric code available: explicit HTTP status, then nested provider code.
    pub fn effective_code(&self) -> Option<i64> {
        self.status.map(i64::from).or(self.code)
    }

    /// Serialized form used for substring matching.
    pub fn serialized(&self) -> String {
        json!({
            "status": self.status,
            "code": self.code,
            "providerStatus": self.provider_status,
            "message": self.message,
            "body": self.body,
        })
        .to_string()
    }

    /// Partition into retriable and terminal failures.
    pub fn class(&self) -> FailureClass {
        let codes = [self.status.map(i64::from), self.code];
        if codes
            .iter()
            .flatten()
            .any(|code| TRANSIENT_CODES.contains(code))
        {
            return FailureClass::Transient;
        }

        if TRANSIENT_MESSAGE_MARKERS
            .iter()
            .any(|marker| self.message.contains(marker))
        {
            return FailureClass::Transient;
        }

        let serialized = self.serialized();
        if TRANSIENT_SERIALIZED_MARKERS
            .iter()
            .any(|marker| serialized.contains(marker))
        {
            return FailureClass::Transient;
        }

        FailureClass::Terminal
    }

    pub fn is_transient(&self) -> bool {
        self.class() == FailureClass::Transient
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            return f.write_str(&self.message);
        }
        match (self.effective_code(), self.provider_status.as_deref()) {
            (Some(code), Some(status)) => write!(f, "provider error {code} ({status})"),
            (Some(code), None) => write!(f, "provider error {code}"),
            (None, Some(status)) => write!(f, "provider error ({status})"),
            (None, None) => f.write_str("unknown provider error"),
        }
    }
}

impl std::error::Error for ProviderError {}

fn code_from_value(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Default retry predicate.
pub fn is_transient(error: &ProviderError) -> bool {
    error.is_transient()
}
