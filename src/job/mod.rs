//! Job payload module.
//!
//! Normalizes trend records into job payloads, validates them at the
//! execution boundary, and models the per-job workspace manifest.

pub mod builder;
pub mod manifest;
pub mod model;
pub mod normalize;
pub mod validate;

// Re-exports for convenience
pub use builder::build_job;
pub use manifest::{FileEntry, JobPaths, JobStatus, Manifest, JOB_FOLDERS};
pub use model::{
    AssetDescriptor, IoConfig, JobPayload, Lane, MjBlock, PbnBlock, Providers, RequestedOutputs,
    TrendSummary, BATHMAT_GENERATOR,
};
pub use normalize::normalize_variations;
pub use validate::{validate_payload, ValidationError, REQUIRED_TOP_KEYS};
