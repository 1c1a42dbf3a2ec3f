//! Job API error types.

use std::time::Duration;

use thiserror::Error;

use sforge_models::ClassifiedFailure;

pub type JobsResult<T> = Result<T, JobsError>;

#[derive(Debug, Error)]
pub enum JobsError {
    /// Transport-level failure (connect, DNS, reset, per-request timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Connection failure reported without a transport error value.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status without a structured error body.
    #[error("Job API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Backend reported an application-level failure.
    #[error("Job rejected: {0}")]
    Rejected(ClassifiedFailure),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The overall polling deadline elapsed before the job settled.
    #[error("Job did not settle within {0:?}")]
    DeadlineExceeded(Duration),
}

impl JobsError {
    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::ConnectionFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether retrying the operation could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            JobsError::Network(_)
            | JobsError::ConnectionFailed(_)
            | JobsError::DeadlineExceeded(_) => true,
            JobsError::Rejected(failure) => failure.retryable,
            JobsError::Api { .. } | JobsError::InvalidResponse(_) => false,
        }
    }
}
