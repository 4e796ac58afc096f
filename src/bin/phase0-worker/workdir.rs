//! Job workspace materialization: folder tree, log file, manifest.

use std::fs;
use std::io::Write;

use chrono::{SecondsFormat, Utc};

use trendfactory::job::{JobPaths, Manifest};

/// Workspace errors
#[derive(Debug, thiserror::Error)]
pub enum WorkdirError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// ISO-8601 UTC timestamp with a trailing `Z`, the format used in both log
/// lines and manifests.
pub fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Creates the job root and its fixed subdirectories.
pub fn create_tree(paths: &JobPaths) -> Result<(), WorkdirError> {
    fs::create_dir_all(&paths.root)?;
    for dir in paths.folders() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Appends one timestamped line to the job log. The root must exist.
pub fn append_log(paths: &JobPaths, msg: &str) -> Result<(), WorkdirError> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.logs)?;
    writeln!(file, "[{}] {}", now_utc(), msg)?;
    Ok(())
}

/// Writes the manifest JSON, pretty-printed.
pub fn write_manifest(paths: &JobPaths, manifest: &Manifest) -> Result<(), WorkdirError> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&paths.manifest, json)?;
    Ok(())
}
