//! Generation job API HTTP client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use sforge_models::{ClassifiedFailure, JobId, JobPayload};

use crate::error::{JobsError, JobsResult};
use crate::types::{JobStatusResponse, StartJobResponse};

/// Configuration for the job API client.
#[derive(Debug, Clone)]
pub struct JobsClientConfig {
    /// Base URL of the job API
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for JobsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl JobsClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SFORGE_JOBS_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            request_timeout: Duration::from_secs(
                std::env::var("SFORGE_JOBS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

/// Client for the generation job API.
pub struct JobsClient {
    http: Client,
    config: JobsClientConfig,
}

impl JobsClient {
    /// Create a new client.
    pub fn new(config: JobsClientConfig) -> JobsResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(JobsError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> JobsResult<Self> {
        Self::new(JobsClientConfig::from_env())
    }

    /// Submit a generation job.
    ///
    /// The payload is assumed to be validated by the wizard step that
    /// assembled it; rejection by the backend surfaces as
    /// [`JobsError::Rejected`]. Never retries — retry is a supervisor
    /// decision.
    pub async fn start_job(&self, payload: &JobPayload) -> JobsResult<JobId> {
        let url = format!("{}/api/jobs", self.config.base_url);

        debug!(kind = %payload.kind(), "Submitting generation job");

        let response = self.http.post(&url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let started: StartJobResponse = response
            .json()
            .await
            .map_err(|e| JobsError::invalid_response(format!("start response: {e}")))?;

        debug!(job_id = %started.job_id, "Job accepted");
        Ok(started.job_id)
    }

    /// Fetch current job status.
    ///
    /// Idempotent; safe to call on any cadence.
    pub async fn job_status(&self, id: &JobId) -> JobsResult<JobStatusResponse> {
        let url = format!("{}/api/jobs/{}", self.config.base_url, id);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| JobsError::invalid_response(format!("status response: {e}")))
    }

    /// Request cancellation of a running job. Best-effort: the backend
    /// may have already finished the job, in which case 404/409 are
    /// treated as success.
    pub async fn cancel_job(&self, id: &JobId) -> JobsResult<()> {
        let url = format!("{}/api/jobs/{}/cancel", self.config.base_url, id);

        let response = self.http.post(&url).send().await?;
        let status = response.status();

        if status.is_success()
            || status == StatusCode::NOT_FOUND
            || status == StatusCode::CONFLICT
        {
            debug!(job_id = %id, status = %status, "Cancel request acknowledged");
            return Ok(());
        }

        warn!(job_id = %id, status = %status, "Cancel request rejected");
        Err(Self::error_from_response(response).await)
    }

    /// Map a non-success response to an error, preferring the backend's
    /// structured failure body when it parses.
    async fn error_from_response(response: reqwest::Response) -> JobsError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ClassifiedFailure>(&body) {
            Ok(failure) => JobsError::Rejected(failure),
            Err(_) => JobsError::Api { status, body },
        }
    }
}
