//! Trend ingestion module.
//!
//! Models the upstream trend-planner records and extracts them from the
//! wrapper documents the planner emits.

pub mod extract;
pub mod model;

// Re-exports for convenience
pub use extract::extract_trends;
pub use model::{StyleTier, Trend, Variation, FALLBACK_TIER};
