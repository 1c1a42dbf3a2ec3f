//! Failure classification.
//!
//! Every error a job can surface is normalized into a
//! [`ClassifiedFailure`] here, in priority order:
//!
//! 1. a backend-supplied application failure passes through verbatim
//! 2. network/connection failures map to `NETWORK_ERROR`, retryable
//! 3. the local polling deadline maps to `TIMEOUT`, retryable
//! 4. anything else degrades to `UNKNOWN`, not retryable
//!
//! This function never panics; an unrecognized shape is case 4.

use crate::error::JobsError;
use sforge_models::ClassifiedFailure;

/// Normalize a job API error into the shape the wizard displays.
pub fn classify(error: &JobsError) -> ClassifiedFailure {
    match error {
        JobsError::Rejected(failure) => failure.clone(),
        JobsError::Network(e) => ClassifiedFailure::network(format!("Request failed: {e}")),
        JobsError::ConnectionFailed(msg) => {
            ClassifiedFailure::network(format!("Connection failed: {msg}"))
        }
        JobsError::DeadlineExceeded(timeout) => ClassifiedFailure::timeout(format!(
            "Generation did not finish within {}s; it may still be running",
            timeout.as_secs()
        )),
        JobsError::Api { status, body } => {
            ClassifiedFailure::unknown(format!("Job API returned {status}"))
                .with_details(serde_json::json!({ "status": status, "body": body }))
        }
        JobsError::InvalidResponse(msg) => {
            ClassifiedFailure::unknown(format!("Invalid response from job API: {msg}"))
        }
    }
}
