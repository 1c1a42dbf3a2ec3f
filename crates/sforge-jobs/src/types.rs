//! Job API request/response types.

use serde::{Deserialize, Serialize};

use sforge_models::{ClassifiedFailure, Job, JobId, JobKind, JobStatus};

/// Response from job submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartJobResponse {
    /// Backend-assigned job ID
    pub job_id: JobId,
}

/// Response from a job status query.
///
/// `error` is present only when `status` is `failed`; `result` only when
/// `status` is `completed`. Both are tolerated as absent regardless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    /// Current status
    pub status: JobStatus,

    /// Progress percentage (0-100)
    #[serde(default)]
    pub progress: u8,

    /// Result payload when completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Failure when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ClassifiedFailure>,
}

impl JobStatusResponse {
    /// Convert the wire response into a client-side [`Job`] snapshot.
    ///
    /// A `failed` status with no error body degrades to an `UNKNOWN`
    /// failure rather than an empty one.
    pub fn into_job(self, id: JobId, kind: JobKind) -> Job {
        let mut job = Job::new(id, kind).with_progress(self.progress);
        job.status = self.status;
        match self.status {
            JobStatus::Completed => {
                job.progress = 100;
                job.result = self.result;
            }
            JobStatus::Failed => {
                job.failure = Some(self.error.unwrap_or_else(|| {
                    ClassifiedFailure::unknown("Job failed without an error report")
                }));
            }
            _ => {}
        }
        job
    }
}
