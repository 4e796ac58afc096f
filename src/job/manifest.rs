//! Per-job workspace manifest.
//!
//! The execution layer materializes each job as a directory tree rooted at
//! `{output_base_dir}/{job_id}` and records status, paths and assets in a
//! `manifest.json` at the root. Construction here is pure; the worker does
//! the actual filesystem work.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Fixed subdirectories of every job workspace, in creation order.
pub const JOB_FOLDERS: &[&str] = &[
    "inputs",
    "pod",
    "digital",
    "palette",
    "pbn",
    "procreate",
    "previews",
];

/// Lifecycle status recorded in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Folder tree and manifest written, no source image fetched yet.
    Phase0Initialized,
    /// The payload failed structural validation; see `validation_errors`.
    FailedValidation,
    /// Folder tree written and the source image fetched.
    Phase0Complete,
    /// A side-effecting step (e.g. the source download) failed; see `error`.
    Error,
}

/// Resolved filesystem layout of one job workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPaths {
    pub root: PathBuf,
    pub inputs: PathBuf,
    pub pod: PathBuf,
    pub digital: PathBuf,
    pub palette: PathBuf,
    pub pbn: PathBuf,
    pub procreate: PathBuf,
    pub previews: PathBuf,
    pub logs: PathBuf,
    pub manifest: PathBuf,
}

impl JobPaths {
    /// Derives the fixed workspace layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            inputs: root.join("inputs"),
            pod: root.join("pod"),
            digital: root.join("digital"),
            palette: root.join("palette"),
            pbn: root.join("pbn"),
            procreate: root.join("procreate"),
            previews: root.join("previews"),
            logs: root.join("logs.txt"),
            manifest: root.join("manifest.json"),
            root,
        }
    }

    /// The seven content subdirectories, in creation order.
    pub fn folders(&self) -> [&Path; 7] {
        [
            &self.inputs,
            &self.pod,
            &self.digital,
            &self.palette,
            &self.pbn,
            &self.procreate,
            &self.previews,
        ]
    }
}

/// A file recorded in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileEntry {
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub type_: String,
    pub role: String,
}

/// Persisted record of a job's status, paths and assets.
///
/// Built from the raw payload rather than the typed model so a failure
/// manifest can still be written for payloads that did not validate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub job_id: String,
    pub collection_id: Value,
    pub created_utc: String,
    pub status: JobStatus,
    pub trend: Value,
    pub difficulty: Value,
    pub providers: Value,
    pub requested_outputs: Value,
    pub paths: JobPaths,
    pub files: Vec<FileEntry>,
    pub assets: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Manifest {
    /// Builds a fresh phase-0 manifest for `payload`, rooted at `root`.
    pub fn new(payload: &Value, root: impl Into<PathBuf>, created_utc: impl Into<String>) -> Self {
        let field = |key: &str| payload.get(key).cloned().unwrap_or(Value::Null);
        let object_field = |key: &str| {
            payload
                .get(key)
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default()))
        };

        Self {
            job_id: payload
                .get("job_id")
                .and_then(Value::as_str)
                .unwrap_or("job_unknown")
                .to_string(),
            collection_id: field("collection_id"),
            created_utc: created_utc.into(),
            status: JobStatus::Phase0Initialized,
            trend: object_field("trend"),
            difficulty: field("difficulty"),
            providers: object_field("providers"),
            requested_outputs: object_field("requested_outputs"),
            paths: JobPaths::new(root),
            files: Vec::new(),
            assets: payload
                .get("assets")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
            validation_errors: None,
            error: None,
        }
    }

    /// Builder: set the status.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder: mark as failed validation, recording the violations.
    pub fn with_validation_errors(mut self, errors: Vec<String>) -> Self {
        self.status = JobStatus::FailedValidation;
        self.validation_errors = Some(errors);
        self
    }

    /// Builder: mark as errored, recording the cause.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.status = JobStatus::Error;
        self.error = Some(error.into());
        self
    }

    /// Builder: record a materialized file.
    pub fn with_file(mut self, entry: FileEntry) -> Self {
        self.files.push(entry);
        self
    }
}
