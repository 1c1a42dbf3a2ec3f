//! Job lifecycle supervision for the StoryForge creation wizard.
//!
//! The wizard's progress step owns exactly one generation job per visit.
//! This crate provides:
//! - [`poll_until_done`], the interval-driven poll loop with clamped
//!   progress, wall-clock timeout, and cooperative cancellation
//! - [`Supervisor`], the wizard-facing state machine that guards against
//!   duplicate submission and sequences begin/cancel/retry
//! - [`WizardObserver`], the callback surface the wizard implements

pub mod observer;
pub mod poll;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod testutil;

pub use observer::{JobOutcome, WizardObserver};
pub use poll::{poll_until_done, PollConfig};
pub use supervisor::{Supervisor, SupervisorState};
