//! Interval-driven polling of one generation job.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, warn};

use sforge_jobs::{classify, JobApi, JobsError};
use sforge_models::{ClassifiedFailure, Job, JobId, JobKind, JobStatus};

/// Poll loop configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Cadence between status fetches.
    pub interval: Duration,
    /// Overall wall-clock deadline, measured from job start. Exceeding
    /// it stops polling but leaves the job running server-side.
    pub timeout: Duration,
    /// Consecutive status-fetch failures tolerated before the loop
    /// aborts with a network failure. One bad poll never aborts the
    /// loop; this many in a row does.
    pub max_consecutive_failures: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(20 * 60),
            max_consecutive_failures: 5,
        }
    }
}

impl PollConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            interval: Duration::from_secs(
                std::env::var("SFORGE_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.interval.as_secs()),
            ),
            timeout: Duration::from_secs(
                std::env::var("SFORGE_POLL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.timeout.as_secs()),
            ),
            max_consecutive_failures: std::env::var("SFORGE_POLL_MAX_FETCH_FAILURES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_consecutive_failures),
        }
    }
}

/// Poll a job until it settles, the deadline passes, or `cancel` fires.
///
/// Invokes `on_update` once per observation, including the final one
/// for `Completed` and `Failed`. Emitted progress never decreases: a
/// backend regression is clamped to the last-seen maximum.
///
/// Returns the terminal snapshot for `Completed` and `Cancelled`
/// (cancellation is cooperative — the loop stops without further
/// network calls; notifying the backend is the caller's concern).
/// Returns the classified failure for `Failed`, for the deadline, and
/// for `max_consecutive_failures` fetch errors in a row.
pub async fn poll_until_done<F>(
    api: &dyn JobApi,
    id: &JobId,
    kind: JobKind,
    config: &PollConfig,
    cancel: &mut watch::Receiver<bool>,
    mut on_update: F,
) -> Result<Job, ClassifiedFailure>
where
    F: FnMut(&Job),
{
    let started = Instant::now();
    // First fetch happens immediately; the ticker paces the rest.
    let mut ticker = interval_at(started + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut max_progress: u8 = 0;
    let mut consecutive_failures: u32 = 0;

    loop {
        if *cancel.borrow() {
            debug!(job_id = %id, "Cancel observed before poll");
            return Ok(cancelled_snapshot(id, kind, max_progress));
        }

        if started.elapsed() >= config.timeout {
            warn!(job_id = %id, timeout_secs = config.timeout.as_secs(), "Polling deadline exceeded");
            return Err(classify(&JobsError::DeadlineExceeded(config.timeout)));
        }

        match api.job_status(id).await {
            Ok(response) => {
                consecutive_failures = 0;

                // A cancel issued while the fetch was in flight must not
                // be dropped.
                if *cancel.borrow() {
                    debug!(job_id = %id, "Cancel observed after in-flight poll");
                    return Ok(cancelled_snapshot(id, kind, max_progress));
                }

                let mut job = response.into_job(id.clone(), kind);
                job.progress = job.progress.max(max_progress);
                max_progress = job.progress;

                on_update(&job);

                match job.status {
                    JobStatus::Pending | JobStatus::Processing => {}
                    JobStatus::Completed => {
                        debug!(job_id = %id, "Job completed");
                        return Ok(job);
                    }
                    JobStatus::Failed => {
                        let failure = job.failure.clone().unwrap_or_else(|| {
                            ClassifiedFailure::unknown("Job failed without an error report")
                        });
                        warn!(job_id = %id, code = %failure.code, "Job failed: {}", failure.message);
                        return Err(failure);
                    }
                    JobStatus::Cancelled => {
                        debug!(job_id = %id, "Backend reported job cancelled");
                        return Ok(job);
                    }
                }
            }
            Err(e) => {
                consecutive_failures += 1;
                warn!(
                    job_id = %id,
                    attempt = consecutive_failures,
                    "Status fetch failed: {e}"
                );
                if consecutive_failures >= config.max_consecutive_failures {
                    error!(
                        job_id = %id,
                        failures = consecutive_failures,
                        "Aborting poll loop after consecutive fetch failures"
                    );
                    return Err(classify(&e));
                }
                if *cancel.borrow() {
                    return Ok(cancelled_snapshot(id, kind, max_progress));
                }
            }
        }

        if wait_for_tick(&mut ticker, cancel).await {
            debug!(job_id = %id, "Cancel observed between polls");
            return Ok(cancelled_snapshot(id, kind, max_progress));
        }
    }
}

/// Wait for the next poll tick, waking early on cancellation.
/// Returns true if cancellation fired.
async fn wait_for_tick(ticker: &mut Interval, cancel: &mut watch::Receiver<bool>) -> bool {
    loop {
        tokio::select! {
            _ = ticker.tick() => return false,
            changed = cancel.changed() => match changed {
                Ok(()) if *cancel.borrow() => return true,
                Ok(()) => continue,
                Err(_) => {
                    // Cancel source gone; plain interval wait from here on.
                    ticker.tick().await;
                    return false;
                }
            },
        }
    }
}

fn cancelled_snapshot(id: &JobId, kind: JobKind, progress: u8) -> Job {
    Job::new(id.clone(), kind).with_progress(progress).cancel()
}
