//! Generation job identity and lifecycle status.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::failure::ClassifiedFailure;

/// Unique identifier for a generation job.
///
/// Assigned by the backend on submission and opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID (used by in-process fakes and tests;
    /// real IDs come from the backend).
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which wizard workflow produced the job.
///
/// Determines the stage table used when mapping raw progress to a
/// human-readable phase label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Script-driven workflow: parse script, generate character
    /// references, scene images, scene videos, compose.
    FullWorkflow,
    /// Image-driven workflow: animate a pre-configured scene list.
    QuickWorkflow,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::FullWorkflow => "full_workflow",
            JobKind::QuickWorkflow => "quick_workflow",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Backend-reported job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job accepted, waiting for a worker
    #[default]
    Pending,
    /// Job is actively being processed
    Processing,
    /// Job completed successfully
    Completed,
    /// Job failed with an error
    Failed,
    /// Job was cancelled
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client-side snapshot of one remote generation run.
///
/// Snapshots are produced by the poll loop, one per status observation.
/// A job takes exactly one terminal transition; once terminal, the poll
/// loop stops producing snapshots for it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Backend-assigned job ID
    pub id: JobId,

    /// Which workflow created the job
    pub kind: JobKind,

    /// Current status
    #[serde(default)]
    pub status: JobStatus,

    /// Progress percentage (0-100)
    #[serde(default)]
    pub progress: u8,

    /// Result payload, present only when status is `Completed`.
    ///
    /// Opaque to the client (video location plus generation metadata);
    /// passed through to the wizard unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Failure, present only when status is `Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ClassifiedFailure>,

    /// When this snapshot was observed by the client
    pub observed_at: DateTime<Utc>,
}

impl Job {
    /// Create a fresh snapshot for a just-submitted job.
    pub fn new(id: JobId, kind: JobKind) -> Self {
        Self {
            id,
            kind,
            status: JobStatus::Pending,
            progress: 0,
            result: None,
            failure: None,
            observed_at: Utc::now(),
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Update progress, clamping to 0-100.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self.observed_at = Utc::now();
        self
    }

    /// Mark job as completed with its result payload.
    pub fn complete(mut self, result: Option<serde_json::Value>) -> Self {
        self.status = JobStatus::Completed;
        self.progress = 100;
        self.result = result;
        self.observed_at = Utc::now();
        self
    }

    /// Mark job as failed.
    pub fn fail(mut self, failure: ClassifiedFailure) -> Self {
        self.status = JobStatus::Failed;
        self.failure = Some(failure);
        self.observed_at = Utc::now();
        self
    }

    /// Mark job as cancelled.
    pub fn cancel(mut self) -> Self {
        self.status = JobStatus::Cancelled;
        self.observed_at = Utc::now();
        self
    }
}
