//! Job assembly: trend + normalized assets + fixed configuration.

use std::path::Path;

use super::model::{IoConfig, JobPayload, Providers, RequestedOutputs, TrendSummary};
use super::normalize::normalize_variations;
use crate::slug::slugify;
use crate::trend::Trend;

/// Assembles one job payload for a trend at a difficulty tier.
///
/// Pure composition, no I/O. `job_id` is
/// `{collection_id}_{slug(trend_name)}_{difficulty}`, so identical inputs
/// always reproduce identical job and asset identifiers.
pub fn build_job(
    trend: &Trend,
    collection_id: &str,
    difficulty: &str,
    output_base_dir: impl AsRef<Path>,
) -> JobPayload {
    let trend_name = trend.name_or_default();
    let trend_id = slugify(trend_name);
    let job_id = format!("{}_{}_{}", collection_id, trend_id, difficulty);

    JobPayload {
        job_id,
        collection_id: collection_id.to_string(),
        trend: TrendSummary {
            trend_id,
            trend_name: trend_name.to_string(),
            assigned_brand: trend.brand_or_default().to_string(),
            category: trend.category.clone(),
            vibe: trend.vibe.clone(),
            reason: trend.reason.clone(),
            visual_motifs: trend.visual_motifs.clone(),
            color_palette_human: trend.color_palette.clone(),
        },
        difficulty: difficulty.to_string(),
        providers: Providers::default(),
        requested_outputs: RequestedOutputs::default(),
        assets: normalize_variations(trend, difficulty),
        io: IoConfig::new(output_base_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::{StyleTier, Variation};
    use std::collections::HashSet;

    fn sample_trend() -> Trend {
        let mut trend = Trend {
            trend_name: "Sunset Coast".to_string(),
            assigned_brand: "Loom & Light".to_string(),
            category: Some("Coastal".to_string()),
            ..Trend::default()
        };
        trend.style_variants.insert(
            "intermediate".to_string(),
            StyleTier {
                variations: vec![
                    Variation {
                        type_: Some("Hero".to_string()),
                        purpose: Some("Tapestry".to_string()),
                        aspect_ratio: Some("--ar 4:5".to_string()),
                        visual_prompt: Some("Gradient dusk over a calm sea".to_string()),
                        pbn_twin_prompt: Some("Simplified dusk scene".to_string()),
                    },
                    Variation {
                        type_: Some("Pattern".to_string()),
                        purpose: Some("Gift Wrap".to_string()),
                        aspect_ratio: Some("--tile 1:1".to_string()),
                        visual_prompt: Some("Repeating wave motif".to_string()),
                        pbn_twin_prompt: None,
                    },
                ],
            },
        );
        trend
    }

    #[test]
    fn test_job_id_composition() {
        let job = build_job(&sample_trend(), "LL_2026-02-10", "intermediate", "/data/outputs");
        assert_eq!(job.job_id, "LL_2026-02-10_sunset-coast_intermediate");
        assert_eq!(job.trend.trend_id, "sunset-coast");
        assert_eq!(job.trend.assigned_brand, "Loom & Light");
    }

    #[test]
    fn test_build_job_is_idempotent() {
        let trend = sample_trend();
        let a = build_job(&trend, "LL_2026-02-10", "intermediate", "/data/outputs");
        let b = build_job(&trend, "LL_2026-02-10", "intermediate", "/data/outputs");
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_asset_ids_are_unique() {
        let job = build_job(&sample_trend(), "LL_2026-02-10", "intermediate", "/data/outputs");
        let ids: HashSet<&str> = job.assets.iter().map(|a| a.asset_id.as_str()).collect();
        assert_eq!(ids.len(), job.assets.len());
    }

    #[test]
    fn test_every_job_has_bathmat_coverage() {
        let job = build_job(&sample_trend(), "LL_2026-02-10", "intermediate", "/data/outputs");
        assert!(job.assets.iter().any(|a| a.is_bathmat_generated()));
    }

    #[test]
    fn test_tile_variation_token() {
        let job = build_job(&sample_trend(), "LL_2026-02-10", "intermediate", "/data/outputs");
        let pattern = job
            .assets
            .iter()
            .find(|a| a.type_ == "Pattern")
            .unwrap();
        assert_eq!(pattern.aspect_ratio.as_deref(), Some("1x1_tile"));
        assert_eq!(pattern.asset_id, "sunset-coast_pattern_1x1-tile");
    }

    #[test]
    fn test_requested_difficulty_recorded_even_on_fallback() {
        // The job records the requested tier; tier resolution is internal to
        // the normalizer.
        let mut trend = sample_trend();
        let tier = trend.style_variants.remove("intermediate").unwrap();
        trend.style_variants.insert("advanced".to_string(), tier);
        let job = build_job(&trend, "LL_2026-02-10", "kids", "/data/outputs");
        assert_eq!(job.difficulty, "kids");
        assert_eq!(job.job_id, "LL_2026-02-10_sunset-coast_kids");
        assert!(job.assets.len() > 1);
    }

    #[test]
    fn test_unnamed_trend_falls_back() {
        let job = build_job(&Trend::default(), "LL_2026-02-10", "intermediate", "/tmp");
        assert_eq!(job.job_id, "LL_2026-02-10_trend_intermediate");
        assert_eq!(job.trend.assigned_brand, "brand");
    }
}
