//! Structural validation of job payloads at the execution boundary.
//!
//! Payloads arrive at the worker as untyped JSON, so validation probes the
//! raw value rather than a deserialized struct. All violations are
//! accumulated and returned together; nothing short-circuits, so a caller
//! sees every problem at once. Validation never mutates the payload and
//! performs no I/O.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

/// Top-level keys every job payload must carry.
pub const REQUIRED_TOP_KEYS: &[&str] = &[
    "job_id",
    "collection_id",
    "trend",
    "difficulty",
    "providers",
    "requested_outputs",
    "assets",
    "io",
];

/// One structural violation found in a job payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Payload must be a JSON object")]
    PayloadNotObject,

    #[error("Missing top-level key: {0}")]
    MissingKey(String),

    #[error("job_id must be a string")]
    JobIdNotString,

    #[error("assets must be an array")]
    AssetsNotArray,

    #[error("assets[{0}] must be an object")]
    AssetNotObject(usize),

    #[error("assets[{0}] missing asset_id")]
    MissingAssetId(usize),

    #[error("Duplicate asset_id: {0}")]
    DuplicateAssetId(String),

    #[error("assets[{0}].mj must be object")]
    MjNotObject(usize),

    #[error("assets[{0}] needs mj.visual_prompt or mj.image_url")]
    MjMissingSource(usize),

    #[error("assets[{0}].pbn must be object")]
    PbnNotObject(usize),

    #[error("providers must be object")]
    ProvidersNotObject,

    #[error("providers must include prodigi and printful")]
    MissingProviders,
}

/// Checks a job payload's structural invariants.
///
/// Returns every violation found; an empty list means the payload is valid.
pub fn validate_payload(payload: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(obj) = payload.as_object() else {
        errors.push(ValidationError::PayloadNotObject);
        return errors;
    };

    for key in REQUIRED_TOP_KEYS {
        if !obj.contains_key(*key) {
            errors.push(ValidationError::MissingKey(key.to_string()));
        }
    }

    if let Some(job_id) = obj.get("job_id") {
        if !job_id.is_string() {
            errors.push(ValidationError::JobIdNotString);
        }
    }

    match obj.get("assets") {
        Some(Value::Array(assets)) => validate_assets(assets, &mut errors),
        Some(_) => errors.push(ValidationError::AssetsNotArray),
        None => {}
    }

    match obj.get("providers") {
        Some(Value::Object(providers)) => {
            if !providers.contains_key("prodigi") || !providers.contains_key("printful") {
                errors.push(ValidationError::MissingProviders);
            }
        }
        Some(_) => errors.push(ValidationError::ProvidersNotObject),
        None => {}
    }

    errors
}

fn validate_assets(assets: &[Value], errors: &mut Vec<ValidationError>) {
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for (i, asset) in assets.iter().enumerate() {
        let Some(asset_obj) = asset.as_object() else {
            errors.push(ValidationError::AssetNotObject(i));
            continue;
        };

        match asset_obj
            .get("asset_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
        {
            None => errors.push(ValidationError::MissingAssetId(i)),
            Some(id) => {
                if !seen_ids.insert(id) {
                    errors.push(ValidationError::DuplicateAssetId(id.to_string()));
                }
            }
        }

        // Generated assets are synthesized locally and carry no prompt
        // blocks; they are exempt from the mj/pbn checks.
        if asset_obj
            .get("generator")
            .and_then(Value::as_str)
            .is_some()
        {
            continue;
        }

        if let Some(mj) = asset_obj.get("mj").filter(|v| !v.is_null()) {
            match mj.as_object() {
                None => errors.push(ValidationError::MjNotObject(i)),
                Some(mj_obj) => {
                    if !has_text(mj_obj.get("visual_prompt")) && !has_text(mj_obj.get("image_url"))
                    {
                        errors.push(ValidationError::MjMissingSource(i));
                    }
                }
            }
        }

        if let Some(pbn) = asset_obj.get("pbn").filter(|v| !v.is_null()) {
            if !pbn.is_object() {
                errors.push(ValidationError::PbnNotObject(i));
            }
        }
    }
}

fn has_text(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}
