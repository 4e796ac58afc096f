//! Job payload data model.
//!
//! A job is one unit of downstream work: one trend at one difficulty tier,
//! with a canonical asset list and fixed provider/output configuration.
//! Payloads are constructed once and serialized; the core never mutates them
//! afterwards (downstream fills in `image_url` fields out of scope here).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Generator tag for locally synthesized bath-mat textures.
pub const BATHMAT_GENERATOR: &str = "bathmat_texture_from_palette";

// =============================================================================
// ASSET DESCRIPTOR
// =============================================================================

/// Downstream processing path for an asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Externally rendered raster art for print-on-demand products.
    #[default]
    PodRaster,
    /// Paint-by-numbers twin of a raster asset.
    Pbn,
    /// Locally synthesized, no external image pipeline involved.
    Generated,
    /// Raster asset that also feeds the paint-by-numbers lane.
    PodRasterPbn,
}

/// Prompt and image slot for the external image pipeline.
///
/// `image_url` stays a null placeholder until a render is selected
/// downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MjBlock {
    pub visual_prompt: Option<String>,
    pub image_url: Option<String>,
}

/// Prompt and image slot for the paint-by-numbers twin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PbnBlock {
    pub pbn_twin_prompt: String,
    pub image_url: Option<String>,
}

/// One normalized design artifact within a job.
///
/// Exactly one of `mj`/`pbn` or `generator` is populated, depending on the
/// lane. `asset_id` is unique within a job; the validator enforces this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetDescriptor {
    pub asset_id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub purpose: Option<String>,
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub lane: Lane,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mj: Option<MjBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pbn: Option<PbnBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

impl AssetDescriptor {
    /// True when this asset is the locally generated bath-mat texture.
    pub fn is_bathmat_generated(&self) -> bool {
        self.generator.as_deref() == Some(BATHMAT_GENERATOR)
    }
}

// =============================================================================
// JOB PAYLOAD
// =============================================================================

/// Summarized trend fields carried inside a job payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendSummary {
    pub trend_id: String,
    pub trend_name: String,
    pub assigned_brand: String,
    pub category: Option<String>,
    pub vibe: Option<String>,
    pub reason: Option<String>,
    pub visual_motifs: Option<Value>,
    pub color_palette_human: Option<Value>,
}

/// Product lists per print provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Providers {
    pub prodigi: Vec<String>,
    pub printful: Vec<String>,
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            prodigi: vec!["tapestry".to_string(), "woven_blanket".to_string()],
            printful: vec![
                "pillow".to_string(),
                "shower_curtain".to_string(),
                "gift_wrap".to_string(),
            ],
        }
    }
}

/// Flags selecting which output bundles a job produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestedOutputs {
    pub digital_bundle: bool,
    pub palette: bool,
    pub bathmat_textures: bool,
    pub projector_mode: bool,
    pub pbn_lane: bool,
}

impl Default for RequestedOutputs {
    fn default() -> Self {
        Self {
            digital_bundle: true,
            palette: true,
            bathmat_textures: true,
            projector_mode: false,
            pbn_lane: true,
        }
    }
}

/// I/O configuration injected into each payload so the execution layer
/// carries no hard-coded paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IoConfig {
    pub output_base_dir: PathBuf,
}

impl IoConfig {
    /// Creates an IoConfig rooted at the given base directory.
    pub fn new(output_base_dir: impl AsRef<Path>) -> Self {
        Self {
            output_base_dir: output_base_dir.as_ref().to_path_buf(),
        }
    }
}

/// One unit of downstream work: a trend at a difficulty tier with its full
/// asset set.
///
/// `job_id` is derived deterministically from the collection, slugified
/// trend name and difficulty, so re-running the same inputs reproduces the
/// same identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPayload {
    pub job_id: String,
    pub collection_id: String,
    pub trend: TrendSummary,
    pub difficulty: String,
    pub providers: Providers,
    pub requested_outputs: RequestedOutputs,
    pub assets: Vec<AssetDescriptor>,
    pub io: IoConfig,
}
