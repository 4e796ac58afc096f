//! Trend records as produced by the upstream trend planner.
//!
//! These structs match the embedded JSON emitted by the generative planner.
//! Fields the planner sometimes omits are optional; `visual_motifs` and
//! `color_palette` are kept opaque because the planner varies between plain
//! string arrays and richer objects for them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Difficulty tier used when the requested tier is missing.
pub const FALLBACK_TIER: &str = "intermediate";

/// A themed design concept with associated visual variations and metadata.
///
/// Read-only input to the pipeline; never mutated after extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Trend {
    pub trend_name: String,
    pub assigned_brand: String,

    pub category: Option<String>,
    pub vibe: Option<String>,
    pub reason: Option<String>,

    /// Opaque upstream metadata, copied verbatim into job summaries.
    pub visual_motifs: Option<Value>,
    pub color_palette: Option<Value>,

    /// Variation sets keyed by difficulty tier. Keys are free-form strings;
    /// a BTreeMap keeps fallback tier selection deterministic.
    pub style_variants: BTreeMap<String, StyleTier>,
}

impl Trend {
    /// Trend name, with the fixed fallback for records that omit it.
    pub fn name_or_default(&self) -> &str {
        if self.trend_name.is_empty() {
            "trend"
        } else {
            &self.trend_name
        }
    }

    /// Assigned brand, with the fixed fallback for records that omit it.
    pub fn brand_or_default(&self) -> &str {
        if self.assigned_brand.is_empty() {
            "brand"
        } else {
            &self.assigned_brand
        }
    }

    /// Resolves which difficulty tier to use for this trend.
    ///
    /// Prefers the requested tier, then `"intermediate"`, then the
    /// lexicographically first available tier. Returns `None` only when the
    /// trend carries no tiers at all.
    pub fn resolve_tier<'a>(&'a self, requested: &'a str) -> Option<(&'a str, &'a StyleTier)> {
        if let Some(tier) = self.style_variants.get(requested) {
            return Some((requested, tier));
        }
        if let Some(tier) = self.style_variants.get(FALLBACK_TIER) {
            return Some((FALLBACK_TIER, tier));
        }
        self.style_variants
            .iter()
            .next()
            .map(|(key, tier)| (key.as_str(), tier))
    }
}

/// One difficulty tier's worth of variations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleTier {
    pub variations: Vec<Variation>,
}

/// One requested design artifact within a trend/difficulty combination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Variation {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub purpose: Option<String>,
    pub aspect_ratio: Option<String>,
    pub visual_prompt: Option<String>,
    pub pbn_twin_prompt: Option<String>,
}
