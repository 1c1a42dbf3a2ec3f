//! Shared data models for the StoryForge generation pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Generation jobs and their lifecycle status
//! - Submission payloads for both wizard workflows
//! - Classified failures (code, message, details, retryable)
//! - Progress-to-stage mapping for the wizard's progress view

pub mod failure;
pub mod job;
pub mod payload;
pub mod stage;

// Re-export common types
pub use failure::ClassifiedFailure;
pub use job::{Job, JobId, JobKind, JobStatus};
pub use payload::{
    CameraMotion, FullWorkflowPayload, GenerationConfig, JobPayload, QuickScene,
    QuickWorkflowPayload,
};
pub use stage::{stage_for, FullWorkflowStage, QuickWorkflowStage};
