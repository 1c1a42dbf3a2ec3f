//! Client for the StoryForge generation job API.
//!
//! This crate provides:
//! - [`JobsClient`], a reqwest-based client for starting, observing, and
//!   cancelling generation jobs
//! - [`JobApi`], the transport-agnostic trait the supervision layer
//!   polls through
//! - [`classify`], the failure classifier that normalizes every error
//!   into a [`sforge_models::ClassifiedFailure`]

pub mod api;
pub mod classify;
pub mod client;
pub mod error;
pub mod types;

pub use api::JobApi;
pub use classify::classify;
pub use client::{JobsClient, JobsClientConfig};
pub use error::{JobsError, JobsResult};
pub use types::{JobStatusResponse, StartJobResponse};
