//! Classified failure shape shared by every error path.
//!
//! Every failure the supervision layer surfaces — transport, timeout,
//! or backend-reported — is normalized into a [`ClassifiedFailure`]
//! before it reaches the wizard.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized failure carrying a machine code, a display-safe message,
/// optional diagnostics, and a retryability flag.
///
/// `details` is free-form structured payload (service name, pipeline
/// stage, upstream error code). It is carried through for diagnostics
/// and never inspected by the supervision layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Error)]
#[error("{code}: {message}")]
pub struct ClassifiedFailure {
    /// Short machine token, e.g. `NETWORK_ERROR` or a backend-supplied
    /// application code.
    pub code: String,

    /// Human-readable message, safe to display.
    pub message: String,

    /// Free-form diagnostic payload, passed through unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// Whether offering a retry makes sense.
    #[serde(default)]
    pub retryable: bool,
}

impl ClassifiedFailure {
    /// Transient transport failure.
    pub const NETWORK_ERROR: &'static str = "NETWORK_ERROR";
    /// Local deadline exceeded; the job may still be running server-side.
    pub const TIMEOUT: &'static str = "TIMEOUT";
    /// Unrecognized failure shape.
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// Create a failure with an explicit code and retryability.
    pub fn new(code: impl Into<String>, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable,
        }
    }

    /// Transient network failure (retryable).
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(Self::NETWORK_ERROR, message, true)
    }

    /// Local deadline exceeded (retryable).
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(Self::TIMEOUT, message, true)
    }

    /// Unrecognized failure (not retryable).
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Self::UNKNOWN, message, false)
    }

    /// Attach diagnostic details.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
