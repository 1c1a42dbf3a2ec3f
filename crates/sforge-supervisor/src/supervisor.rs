//! Wizard-facing owner of one generation job's lifecycle.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use sforge_jobs::{classify, JobApi};
use sforge_models::{stage_for, ClassifiedFailure, Job, JobPayload, JobStatus};

use crate::observer::{JobOutcome, WizardObserver};
use crate::poll::{poll_until_done, PollConfig};

/// Supervisor lifecycle state.
///
/// `Succeeded`, `Failed`, and `Cancelled` are sticky: once reached, only
/// [`Supervisor::retry`] (from `Failed`, with a retryable failure) can
/// restart the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupervisorState {
    /// No job started in this session yet
    Idle,
    /// Submission in flight
    Starting,
    /// Job submitted, poll loop running
    Polling,
    /// Job completed
    Succeeded,
    /// Job failed, timed out, or could not be submitted
    Failed,
    /// Job cancelled
    Cancelled,
}

impl SupervisorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupervisorState::Idle => "idle",
            SupervisorState::Starting => "starting",
            SupervisorState::Polling => "polling",
            SupervisorState::Succeeded => "succeeded",
            SupervisorState::Failed => "failed",
            SupervisorState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SupervisorState::Succeeded | SupervisorState::Failed | SupervisorState::Cancelled
        )
    }
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-mount session state. Created with the supervisor, never persisted.
struct Session {
    state: SupervisorState,
    payload: Option<JobPayload>,
    current_job: Option<Job>,
    last_failure: Option<ClassifiedFailure>,
    task: Option<JoinHandle<()>>,
}

/// Owns one generation job per wizard visit: guards against duplicate
/// submission, wires submit → poll → settle, and exposes cancel/retry.
///
/// `begin` is idempotent under at-least-once invocation: a second call
/// in the same session is a no-op, which absorbs UI double-invokes.
pub struct Supervisor {
    api: Arc<dyn JobApi>,
    config: PollConfig,
    observer: Arc<dyn WizardObserver>,
    session: Mutex<Session>,
    cancel_tx: watch::Sender<bool>,
}

impl Supervisor {
    /// Create a supervisor for one wizard session.
    pub fn new(
        api: Arc<dyn JobApi>,
        config: PollConfig,
        observer: Arc<dyn WizardObserver>,
    ) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self {
            api,
            config,
            observer,
            session: Mutex::new(Session {
                state: SupervisorState::Idle,
                payload: None,
                current_job: None,
                last_failure: None,
                task: None,
            }),
            cancel_tx,
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        // Recover from poisoning: session state stays usable even if an
        // observer callback panicked on another thread.
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SupervisorState {
        self.session().state
    }

    /// Latest job snapshot, if a job was submitted this session.
    pub fn current_job(&self) -> Option<Job> {
        self.session().current_job.clone()
    }

    /// Failure that settled the last attempt, if any.
    pub fn last_failure(&self) -> Option<ClassifiedFailure> {
        self.session().last_failure.clone()
    }

    /// Start the session's job. Returns false (and does nothing) if a
    /// job was already started in this session.
    pub fn begin(self: &Arc<Self>, payload: JobPayload) -> bool {
        let mut session = self.session();
        if session.state != SupervisorState::Idle {
            warn!(state = %session.state, "begin() ignored: session already has a job");
            return false;
        }
        session.state = SupervisorState::Starting;
        session.payload = Some(payload.clone());
        session.current_job = None;
        session.last_failure = None;
        self.cancel_tx.send_replace(false);

        let this = Arc::clone(self);
        session.task = Some(tokio::spawn(async move { this.run(payload).await }));
        true
    }

    /// Request cancellation of the running job.
    ///
    /// The transition to `Cancelled` is local and prompt; the backend is
    /// notified best-effort and its answer (or silence) is not waited on.
    pub fn cancel(&self) {
        let state = self.session().state;
        match state {
            SupervisorState::Starting | SupervisorState::Polling => {
                info!("Cancel requested");
                self.cancel_tx.send_replace(true);
            }
            _ => debug!(state = %state, "cancel() ignored: no active job"),
        }
    }

    /// Restart after a retryable failure. Returns false (and does
    /// nothing) unless the state is `Failed` and the last failure was
    /// marked retryable.
    pub fn retry(self: &Arc<Self>) -> bool {
        let payload = {
            let mut session = self.session();
            if session.state != SupervisorState::Failed {
                debug!(state = %session.state, "retry() ignored: not in a failed state");
                return false;
            }
            let retryable = session
                .last_failure
                .as_ref()
                .map(|f| f.retryable)
                .unwrap_or(false);
            if !retryable {
                warn!("retry() ignored: last failure is not retryable");
                return false;
            }
            session.state = SupervisorState::Idle;
            session.current_job = None;
            session.payload.clone()
        };

        match payload {
            Some(payload) => self.begin(payload),
            None => false,
        }
    }

    /// Tear down the session: abort the supervision task so no state
    /// update fires after the observer is gone. The remote job keeps
    /// running; this releases local resources only.
    pub fn shutdown(&self) {
        if let Some(task) = self.session().task.take() {
            task.abort();
        }
    }

    /// Drive one job attempt from submission to settlement.
    async fn run(self: Arc<Self>, payload: JobPayload) {
        let kind = payload.kind();

        let job_id = match self.api.start_job(&payload).await {
            Ok(id) => id,
            Err(e) => {
                let failure = classify(&e);
                error!(code = %failure.code, "Submission failed: {e}");
                self.settle_failed(failure);
                return;
            }
        };

        {
            let mut session = self.session();
            session.state = SupervisorState::Polling;
            session.current_job = Some(Job::new(job_id.clone(), kind));
        }
        info!(job_id = %job_id, kind = %kind, "Job submitted, polling");

        // A cancel issued while submission was in flight is observed by
        // the poll loop before its first status fetch.
        let mut cancel_rx = self.cancel_tx.subscribe();
        let this = Arc::clone(&self);
        let result = poll_until_done(
            self.api.as_ref(),
            &job_id,
            kind,
            &self.config,
            &mut cancel_rx,
            |job| {
                this.session().current_job = Some(job.clone());
                this.observer.on_progress(job, stage_for(job.kind, job.progress));
            },
        )
        .await;

        match result {
            Ok(job) if job.status == JobStatus::Completed => {
                {
                    let mut session = self.session();
                    session.state = SupervisorState::Succeeded;
                    session.current_job = Some(job.clone());
                }
                info!(job_id = %job.id, "Job succeeded");
                self.observer.on_settled(&JobOutcome::Succeeded(job));
            }
            Ok(job) => {
                // Cancelled, locally or by the backend. Notify the
                // backend only for a local cancel, and never wait on it.
                if *self.cancel_tx.borrow() {
                    let api = Arc::clone(&self.api);
                    let id = job.id.clone();
                    tokio::spawn(async move {
                        if let Err(e) = api.cancel_job(&id).await {
                            debug!(job_id = %id, "Backend cancel notification failed: {e}");
                        }
                    });
                }
                {
                    let mut session = self.session();
                    session.state = SupervisorState::Cancelled;
                    session.current_job = Some(job.clone());
                }
                info!(job_id = %job.id, "Job cancelled");
                self.observer.on_settled(&JobOutcome::Cancelled);
            }
            Err(failure) => self.settle_failed(failure),
        }
    }

    fn settle_failed(&self, failure: ClassifiedFailure) {
        {
            let mut session = self.session();
            session.state = SupervisorState::Failed;
            session.last_failure = Some(failure.clone());
            if let Some(job) = session.current_job.take() {
                session.current_job = Some(job.fail(failure.clone()));
            }
        }
        self.observer.on_settled(&JobOutcome::Failed(failure));
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        if let Ok(session) = self.session.get_mut() {
            if let Some(task) = session.task.take() {
                task.abort();
            }
        }
    }
}
