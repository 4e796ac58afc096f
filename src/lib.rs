//! TrendFactory - normalizes trend-planner documents into print-on-demand
//! job payloads.
//!
//! The upstream generative planner emits a nested, loosely-structured
//! wrapper document describing "trend" design concepts. This crate turns
//! that into a flat collection of well-formed job payloads:
//!
//! - **Extraction**: locate the trend array embedded in the wrapper,
//!   tolerating both raw arrays and narrative-wrapped responses
//! - **Normalization**: map each trend's variations at a difficulty tier
//!   onto canonical, uniquely-identified asset descriptors
//! - **Validation**: check a payload's structural invariants before any
//!   side-effecting work happens
//!
//! All core operations are synchronous, pure functions over in-memory
//! values; the feature-gated binaries (`trends2jobs`, `phase0-worker`) own
//! the file and network boundaries.
//!
//! # Example
//!
//! ```rust
//! use trendfactory::{build_job, extract_trends, validate_payload};
//!
//! let wrapper = serde_json::json!([
//!     {
//!         "trend_name": "Sunset Coast",
//!         "assigned_brand": "Loom & Light",
//!         "style_variants": { "intermediate": { "variations": [
//!             { "type": "Hero", "purpose": "Tapestry", "aspect_ratio": "--ar 4:5",
//!               "visual_prompt": "Gradient dusk over a calm sea" }
//!         ] } }
//!     }
//! ]);
//!
//! let trends = extract_trends(&wrapper).unwrap();
//! let job = build_job(&trends[0], "LL_2026-02-10", "intermediate", "/data/outputs");
//!
//! assert_eq!(job.job_id, "LL_2026-02-10_sunset-coast_intermediate");
//! assert!(job.assets.iter().any(|a| a.is_bathmat_generated()));
//!
//! let raw = serde_json::to_value(&job).unwrap();
//! assert!(validate_payload(&raw).is_empty());
//! ```

pub mod error;
pub mod job;
pub mod slug;
pub mod trend;

// Re-exports for convenience
pub use error::{FactoryError, FactoryResult};
pub use job::{
    build_job, normalize_variations, validate_payload, AssetDescriptor, JobPayload, JobStatus,
    Lane, Manifest, ValidationError,
};
pub use slug::slugify;
pub use trend::{extract_trends, Trend};
