//! Transport-agnostic job API surface.

use async_trait::async_trait;

use sforge_models::{JobId, JobPayload};

use crate::client::JobsClient;
use crate::error::JobsResult;
use crate::types::JobStatusResponse;

/// The three backend operations the supervision layer depends on.
///
/// [`JobsClient`] is the production implementation; tests substitute
/// scripted fakes.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Submit a job, returning its backend-assigned ID.
    async fn start_job(&self, payload: &JobPayload) -> JobsResult<JobId>;

    /// Fetch current status for a job. Idempotent.
    async fn job_status(&self, id: &JobId) -> JobsResult<JobStatusResponse>;

    /// Request cancellation. Best-effort.
    async fn cancel_job(&self, id: &JobId) -> JobsResult<()>;
}

#[async_trait]
impl JobApi for JobsClient {
    async fn start_job(&self, payload: &JobPayload) -> JobsResult<JobId> {
        JobsClient::start_job(self, payload).await
    }

    async fn job_status(&self, id: &JobId) -> JobsResult<JobStatusResponse> {
        JobsClient::job_status(self, id).await
    }

    async fn cancel_job(&self, id: &JobId) -> JobsResult<()> {
        JobsClient::cancel_job(self, id).await
    }
}
