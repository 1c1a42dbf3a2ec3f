//! Observation surface the wizard implements.

use sforge_models::{ClassifiedFailure, Job};

/// Final outcome of one job attempt.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// Job completed; carries the final snapshot with its result payload.
    Succeeded(Job),
    /// Job failed, timed out, or could not be submitted.
    Failed(ClassifiedFailure),
    /// Job was cancelled by the user (or reported cancelled by the backend).
    Cancelled,
}

/// Callbacks the wizard's progress view receives.
///
/// `on_progress` fires once per poll observation with a progress value
/// that never decreases within one attempt. `on_settled` fires exactly
/// once per attempt.
pub trait WizardObserver: Send + Sync {
    /// A new job snapshot was observed. `stage` is the mapped
    /// human-readable pipeline phase for the snapshot's progress.
    fn on_progress(&self, job: &Job, stage: &'static str);

    /// The attempt reached a terminal outcome.
    fn on_settled(&self, outcome: &JobOutcome);
}
