//! Scripted fakes shared by the supervision tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use sforge_jobs::{JobApi, JobStatusResponse, JobsError, JobsResult};
use sforge_models::{ClassifiedFailure, Job, JobId, JobPayload, JobStatus};

use crate::observer::{JobOutcome, WizardObserver};

/// One scripted response from the fake job API.
#[derive(Debug, Clone)]
pub enum PollScript {
    /// Non-terminal (or bare) status with a progress value.
    Status(JobStatus, u8),
    /// Completed with a result payload.
    Completed,
    /// Failed with a backend-supplied failure body.
    AppError(ClassifiedFailure),
    /// The fetch itself fails.
    NetworkError,
}

impl PollScript {
    fn into_result(self) -> JobsResult<JobStatusResponse> {
        match self {
            PollScript::Status(status, progress) => Ok(JobStatusResponse {
                status,
                progress,
                result: None,
                error: None,
            }),
            PollScript::Completed => Ok(JobStatusResponse {
                status: JobStatus::Completed,
                progress: 100,
                result: Some(serde_json::json!({ "video_url": "https://cdn/out.mp4" })),
                error: None,
            }),
            PollScript::AppError(failure) => Ok(JobStatusResponse {
                status: JobStatus::Failed,
                progress: 0,
                result: None,
                error: Some(failure),
            }),
            PollScript::NetworkError => Err(JobsError::connection_failed("connection refused")),
        }
    }
}

/// Fake [`JobApi`] driven by a scripted response queue.
///
/// Responses are consumed in order; once the queue drains, `fallback`
/// answers every further status fetch.
pub struct ScriptedApi {
    responses: Mutex<VecDeque<PollScript>>,
    fallback: PollScript,
    start_error: Mutex<Option<JobsError>>,
    hang_cancel: bool,
    start_calls: AtomicU32,
    status_calls: AtomicU32,
    cancel_calls: AtomicU32,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: PollScript::Status(JobStatus::Processing, 0),
            start_error: Mutex::new(None),
            hang_cancel: false,
            start_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            cancel_calls: AtomicU32::new(0),
        }
    }

    pub fn with_responses(self, responses: Vec<PollScript>) -> Self {
        *self.responses.lock().unwrap() = responses.into();
        self
    }

    pub fn with_fallback(mut self, fallback: PollScript) -> Self {
        self.fallback = fallback;
        self
    }

    /// Fail the next submission with the given error.
    pub fn with_start_error(self, error: JobsError) -> Self {
        *self.start_error.lock().unwrap() = Some(error);
        self
    }

    /// Make `cancel_job` hang forever instead of acknowledging.
    pub fn with_hanging_cancel(mut self) -> Self {
        self.hang_cancel = true;
        self
    }

    pub fn start_calls(&self) -> u32 {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> u32 {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobApi for ScriptedApi {
    async fn start_job(&self, _payload: &JobPayload) -> JobsResult<JobId> {
        let attempt = self.start_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(error) = self.start_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(JobId::from_string(format!("job-{attempt}")))
    }

    async fn job_status(&self, _id: &JobId) -> JobsResult<JobStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let script = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        script.into_result()
    }

    async fn cancel_job(&self, _id: &JobId) -> JobsResult<()> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_cancel {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

/// Observer that records everything it sees.
#[derive(Default)]
pub struct RecordingObserver {
    progress: Mutex<Vec<u8>>,
    stages: Mutex<Vec<&'static str>>,
    outcomes: Mutex<Vec<JobOutcome>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> Vec<u8> {
        self.progress.lock().unwrap().clone()
    }

    pub fn stages(&self) -> Vec<&'static str> {
        self.stages.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<JobOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl WizardObserver for RecordingObserver {
    fn on_progress(&self, job: &Job, stage: &'static str) {
        self.progress.lock().unwrap().push(job.progress);
        self.stages.lock().unwrap().push(stage);
    }

    fn on_settled(&self, outcome: &JobOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}
