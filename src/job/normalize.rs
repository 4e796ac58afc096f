//! Asset normalization: one trend plus a difficulty selector becomes a
//! canonical list of typed asset descriptors.
//!
//! Malformed trend entries (no `style_variants`, empty `variations`) degrade
//! gracefully to a bath-mat-only asset list instead of aborting the batch;
//! the stricter structural checks live in [`crate::job::validate`].

use super::model::{AssetDescriptor, Lane, MjBlock, PbnBlock, BATHMAT_GENERATOR};
use crate::slug::slugify;
use crate::trend::{Trend, Variation};

/// Converts one trend record into the asset descriptors for `difficulty`.
///
/// The tier is resolved via [`Trend::resolve_tier`]; every job ends up with
/// exactly one bath-mat generator asset, appended synthetically when the
/// source trend never listed one.
pub fn normalize_variations(trend: &Trend, difficulty: &str) -> Vec<AssetDescriptor> {
    let trend_id = slugify(trend.name_or_default());

    let variations: &[Variation] = trend
        .resolve_tier(difficulty)
        .map(|(_, tier)| tier.variations.as_slice())
        .unwrap_or(&[]);

    let mut assets: Vec<AssetDescriptor> = variations
        .iter()
        .map(|variation| normalize_one(&trend_id, variation))
        .collect();

    if !assets.iter().any(AssetDescriptor::is_bathmat_generated) {
        assets.push(synthetic_bathmat());
    }

    assets
}

fn normalize_one(trend_id: &str, variation: &Variation) -> AssetDescriptor {
    let vtype = variation
        .type_
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("asset");

    let raw_ar = variation.aspect_ratio.as_deref().unwrap_or("").trim();
    let ar_token = normalize_ar_token(raw_ar);

    let asset_id = format!(
        "{}_{}_{}",
        trend_id,
        slugify(vtype),
        slugify(if ar_token.is_empty() {
            "na"
        } else {
            ar_token.as_str()
        })
    );

    // Coordinate bath mats are synthesized locally from the palette, never
    // rendered through the external image pipeline.
    let is_bathmat = vtype.eq_ignore_ascii_case("coordinate")
        && variation
            .purpose
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains("bath");

    if is_bathmat {
        return AssetDescriptor {
            asset_id,
            type_: vtype.to_string(),
            purpose: variation.purpose.clone(),
            aspect_ratio: none_if_empty(ar_token),
            lane: Lane::Generated,
            mj: None,
            pbn: None,
            generator: Some(BATHMAT_GENERATOR.to_string()),
        };
    }

    AssetDescriptor {
        asset_id,
        type_: vtype.to_string(),
        purpose: variation.purpose.clone(),
        aspect_ratio: none_if_empty(ar_token),
        lane: Lane::PodRaster,
        mj: Some(MjBlock {
            visual_prompt: variation.visual_prompt.clone(),
            image_url: None,
        }),
        pbn: variation
            .pbn_twin_prompt
            .clone()
            .filter(|prompt| !prompt.is_empty())
            .map(|prompt| PbnBlock {
                pbn_twin_prompt: prompt,
                image_url: None,
            }),
        generator: None,
    }
}

/// Normalizes free-form aspect-ratio text into a stable token.
///
/// Strips the `--ar` marker, drops spaces and maps `:` to `x`; any text
/// mentioning `tile` collapses to the fixed `1x1_tile` token regardless of
/// surrounding content.
fn normalize_ar_token(raw: &str) -> String {
    if raw.contains("tile") {
        return "1x1_tile".to_string();
    }
    raw.replace("--ar", "").replace(' ', "").replace(':', "x")
}

fn none_if_empty(token: String) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn synthetic_bathmat() -> AssetDescriptor {
    AssetDescriptor {
        asset_id: "bathmat_coordinate".to_string(),
        type_: "Coordinate".to_string(),
        purpose: Some("Bath Mat Textures".to_string()),
        aspect_ratio: None,
        lane: Lane::Generated,
        mj: None,
        pbn: None,
        generator: Some(BATHMAT_GENERATOR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::StyleTier;

    fn variation(type_: &str, purpose: &str, ar: &str) -> Variation {
        Variation {
            type_: Some(type_.to_string()),
            purpose: Some(purpose.to_string()),
            aspect_ratio: Some(ar.to_string()),
            visual_prompt: Some("prompt".to_string()),
            pbn_twin_prompt: None,
        }
    }

    fn trend_with_variations(variations: Vec<Variation>) -> Trend {
        let mut trend = Trend {
            trend_name: "Sunset Coast".to_string(),
            ..Trend::default()
        };
        trend
            .style_variants
            .insert("intermediate".to_string(), StyleTier { variations });
        trend
    }

    #[test]
    fn test_ar_token_plain_ratio() {
        assert_eq!(normalize_ar_token("--ar 16:9"), "16x9");
        assert_eq!(normalize_ar_token("4:5"), "4x5");
    }

    #[test]
    fn test_ar_token_tile_forces_fixed_token() {
        assert_eq!(normalize_ar_token("--tile 1:1"), "1x1_tile");
        assert_eq!(normalize_ar_token("seamless tile 2:3"), "1x1_tile");
    }

    #[test]
    fn test_asset_id_composition() {
        let trend = trend_with_variations(vec![variation("Hero", "Tapestry", "--ar 4:5")]);
        let assets = normalize_variations(&trend, "intermediate");
        assert_eq!(assets[0].asset_id, "sunset-coast_hero_4x5");
    }

    #[test]
    fn test_missing_aspect_ratio_uses_na() {
        let trend = trend_with_variations(vec![Variation {
            type_: Some("Hero".to_string()),
            visual_prompt: Some("prompt".to_string()),
            ..Variation::default()
        }]);
        let assets = normalize_variations(&trend, "intermediate");
        assert_eq!(assets[0].asset_id, "sunset-coast_hero_na");
        assert_eq!(assets[0].aspect_ratio, None);
    }

    #[test]
    fn test_default_lane_carries_mj_block() {
        let trend = trend_with_variations(vec![variation("Hero", "Tapestry", "4:5")]);
        let assets = normalize_variations(&trend, "intermediate");
        assert_eq!(assets[0].lane, Lane::PodRaster);
        let mj = assets[0].mj.as_ref().unwrap();
        assert_eq!(mj.visual_prompt.as_deref(), Some("prompt"));
        assert_eq!(mj.image_url, None);
        assert!(assets[0].pbn.is_none());
    }

    #[test]
    fn test_pbn_twin_prompt_attaches_pbn_block() {
        let mut v = variation("Hero", "Tapestry", "4:5");
        v.pbn_twin_prompt = Some("simplified twin".to_string());
        let trend = trend_with_variations(vec![v]);
        let assets = normalize_variations(&trend, "intermediate");
        let pbn = assets[0].pbn.as_ref().unwrap();
        assert_eq!(pbn.pbn_twin_prompt, "simplified twin");
        assert_eq!(pbn.image_url, None);
    }

    #[test]
    fn test_bathmat_coordinate_override() {
        let trend = trend_with_variations(vec![variation("Coordinate", "Bath Mat Set", "1:1")]);
        let assets = normalize_variations(&trend, "intermediate");
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].lane, Lane::Generated);
        assert!(assets[0].mj.is_none());
        assert!(assets[0].pbn.is_none());
        assert_eq!(assets[0].generator.as_deref(), Some(BATHMAT_GENERATOR));
    }

    #[test]
    fn test_override_is_case_insensitive() {
        let trend = trend_with_variations(vec![variation("COORDINATE", "Kids BATH mat", "1:1")]);
        let assets = normalize_variations(&trend, "intermediate");
        assert!(assets[0].is_bathmat_generated());
    }

    #[test]
    fn test_synthetic_bathmat_appended_when_missing() {
        let trend = trend_with_variations(vec![variation("Hero", "Tapestry", "4:5")]);
        let assets = normalize_variations(&trend, "intermediate");
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[1].asset_id, "bathmat_coordinate");
        assert!(assets[1].is_bathmat_generated());
    }

    #[test]
    fn test_exactly_one_bathmat_generator() {
        let trend = trend_with_variations(vec![
            variation("Hero", "Tapestry", "4:5"),
            variation("Coordinate", "Bath Mat Textures", "1:1"),
        ]);
        let assets = normalize_variations(&trend, "intermediate");
        let generated = assets
            .iter()
            .filter(|a| a.is_bathmat_generated())
            .count();
        assert_eq!(generated, 1);
    }

    #[test]
    fn test_trend_without_variants_yields_bathmat_only() {
        let trend = Trend {
            trend_name: "Bare".to_string(),
            ..Trend::default()
        };
        let assets = normalize_variations(&trend, "intermediate");
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].asset_id, "bathmat_coordinate");
    }

    #[test]
    fn test_missing_type_defaults_to_asset() {
        let trend = trend_with_variations(vec![Variation::default()]);
        let assets = normalize_variations(&trend, "intermediate");
        assert_eq!(assets[0].type_, "asset");
        assert_eq!(assets[0].asset_id, "sunset-coast_asset_na");
    }
}
