//! Progress-to-stage mapping for the wizard's progress view.
//!
//! The backend reports an opaque 0-100 percentage; these tables turn it
//! into the pipeline phase a user can actually read. Band boundaries are
//! inclusive-upper: a progress value equal to a boundary belongs to the
//! band that starts at that boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::job::JobKind;

/// Pipeline phase of a full-workflow job.
///
/// Variant order matches pipeline order, so `Ord` reflects progression.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FullWorkflowStage {
    Initializing,
    ParsingScript,
    CharacterReferences,
    SceneImages,
    SceneVideos,
    Composing,
    Finalizing,
}

impl FullWorkflowStage {
    /// Map a raw progress percentage to its pipeline phase.
    ///
    /// Total for any input; values above 100 are treated as 100.
    pub fn from_progress(progress: u8) -> Self {
        match progress.min(100) {
            0..=9 => FullWorkflowStage::Initializing,
            10..=19 => FullWorkflowStage::ParsingScript,
            20..=39 => FullWorkflowStage::CharacterReferences,
            40..=59 => FullWorkflowStage::SceneImages,
            60..=84 => FullWorkflowStage::SceneVideos,
            85..=97 => FullWorkflowStage::Composing,
            _ => FullWorkflowStage::Finalizing,
        }
    }

    /// Human-readable label shown in the progress view.
    pub fn label(&self) -> &'static str {
        match self {
            FullWorkflowStage::Initializing => "Initializing",
            FullWorkflowStage::ParsingScript => "Parsing script",
            FullWorkflowStage::CharacterReferences => "Generating character references",
            FullWorkflowStage::SceneImages => "Generating scene images",
            FullWorkflowStage::SceneVideos => "Generating scene videos",
            FullWorkflowStage::Composing => "Composing video",
            FullWorkflowStage::Finalizing => "Finalizing",
        }
    }
}

impl fmt::Display for FullWorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pipeline phase of a quick-workflow job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum QuickWorkflowStage {
    PreparingImages,
    SceneVideos,
    Composing,
    Finalizing,
}

impl QuickWorkflowStage {
    /// Map a raw progress percentage to its pipeline phase.
    ///
    /// Total for any input; values above 100 are treated as 100.
    pub fn from_progress(progress: u8) -> Self {
        match progress.min(100) {
            0..=9 => QuickWorkflowStage::PreparingImages,
            10..=69 => QuickWorkflowStage::SceneVideos,
            70..=94 => QuickWorkflowStage::Composing,
            _ => QuickWorkflowStage::Finalizing,
        }
    }

    /// Human-readable label shown in the progress view.
    pub fn label(&self) -> &'static str {
        match self {
            QuickWorkflowStage::PreparingImages => "Preparing images",
            QuickWorkflowStage::SceneVideos => "Generating scene videos",
            QuickWorkflowStage::Composing => "Composing video",
            QuickWorkflowStage::Finalizing => "Finalizing",
        }
    }
}

impl fmt::Display for QuickWorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Stage label for a (kind, progress) pair.
pub fn stage_for(kind: JobKind, progress: u8) -> &'static str {
    match kind {
        JobKind::FullWorkflow => FullWorkflowStage::from_progress(progress).label(),
        JobKind::QuickWorkflow => QuickWorkflowStage::from_progress(progress).label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_for_is_total_and_nonempty() {
        for progress in 0..=100u8 {
            assert!(!stage_for(JobKind::FullWorkflow, progress).is_empty());
            assert!(!stage_for(JobKind::QuickWorkflow, progress).is_empty());
        }
    }

    #[test]
    fn test_full_workflow_monotonic() {
        let mut last = FullWorkflowStage::from_progress(0);
        for progress in 1..=100u8 {
            let stage = FullWorkflowStage::from_progress(progress);
            assert!(stage >= last, "stage regressed at progress {progress}");
            last = stage;
        }
    }

    #[test]
    fn test_quick_workflow_monotonic() {
        let mut last = QuickWorkflowStage::from_progress(0);
        for progress in 1..=100u8 {
            let stage = QuickWorkflowStage::from_progress(progress);
            assert!(stage >= last, "stage regressed at progress {progress}");
            last = stage;
        }
    }

    #[test]
    fn test_boundary_belongs_to_starting_band() {
        // A value equal to a boundary opens the next band.
        assert_eq!(
            FullWorkflowStage::from_progress(10),
            FullWorkflowStage::ParsingScript
        );
        assert_eq!(
            FullWorkflowStage::from_progress(9),
            FullWorkflowStage::Initializing
        );
        assert_eq!(
            FullWorkflowStage::from_progress(85),
            FullWorkflowStage::Composing
        );
        assert_eq!(
            FullWorkflowStage::from_progress(98),
            FullWorkflowStage::Finalizing
        );
        assert_eq!(
            FullWorkflowStage::from_progress(100),
            FullWorkflowStage::Finalizing
        );

        assert_eq!(
            QuickWorkflowStage::from_progress(10),
            QuickWorkflowStage::SceneVideos
        );
        assert_eq!(
            QuickWorkflowStage::from_progress(70),
            QuickWorkflowStage::Composing
        );
        assert_eq!(
            QuickWorkflowStage::from_progress(95),
            QuickWorkflowStage::Finalizing
        );
    }

    #[test]
    fn test_overflow_clamps_to_final_stage() {
        assert_eq!(
            FullWorkflowStage::from_progress(255),
            FullWorkflowStage::Finalizing
        );
        assert_eq!(
            QuickWorkflowStage::from_progress(255),
            QuickWorkflowStage::Finalizing
        );
    }
}
