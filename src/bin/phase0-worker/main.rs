//! Phase 0 worker: validates job payloads and materializes per-job
//! workspaces.
//!
//! For each payload: validate, create the folder tree, fetch the source
//! image when the first asset references one, write `manifest.json`. A
//! payload that fails validation still gets a failure manifest for
//! debugging; sibling jobs keep processing.
//!
//! Usage:
//!   phase0-worker --payload jobs.json [--output-base-dir /data/outputs]

mod fetch;
mod workdir;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use trendfactory::job::{validate_payload, FileEntry, JobPaths, JobStatus, Manifest};

#[derive(Parser, Debug)]
#[command(
    name = "phase0-worker",
    about = "Validate job payloads and materialize per-job workspaces",
    version
)]
struct Args {
    /// Payload JSON file: a single job payload or an array of them
    #[arg(short, long)]
    payload: PathBuf,

    /// Override the payloads' io.output_base_dir
    #[arg(long, env = "OUTPUT_BASE_DIR")]
    output_base_dir: Option<PathBuf>,

    /// Skip the source-image download
    #[arg(long)]
    skip_fetch: bool,

    /// Stop on first failed job
    #[arg(long)]
    abort_on_error: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Outcome of processing one payload.
struct JobOutcome {
    job_id: String,
    status: JobStatus,
    detail: Option<String>,
}

impl JobOutcome {
    fn failed(&self) -> bool {
        matches!(self.status, JobStatus::FailedValidation | JobStatus::Error)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.payload).context("Failed to read payload file")?;
    let parsed: Value = serde_json::from_str(&raw).context("Failed to parse payload JSON")?;

    // A single payload object or a batch array.
    let payloads: Vec<Value> = match parsed {
        Value::Array(items) => items,
        single => vec![single],
    };

    if payloads.is_empty() {
        println!("No job payloads to process.");
        return Ok(());
    }

    let client = fetch::build_client().context("Failed to build HTTP client")?;

    let pb = ProgressBar::new(payloads.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::new();
    for payload in &payloads {
        let job_id = payload
            .get("job_id")
            .and_then(Value::as_str)
            .unwrap_or("job_unknown")
            .to_string();
        pb.set_message(job_id.clone());

        let outcome = match run_job(
            &client,
            payload,
            args.output_base_dir.as_deref(),
            args.skip_fetch,
        )
        .await
        {
            Ok(outcome) => outcome,
            // Workspace-level failures (unwritable base dir etc.) are
            // recorded like any other per-job error.
            Err(e) => JobOutcome {
                job_id,
                status: JobStatus::Error,
                detail: Some(e.to_string()),
            },
        };

        if args.verbose || outcome.failed() {
            if outcome.failed() {
                eprintln!(
                    "FAIL: {} - {}",
                    outcome.job_id,
                    outcome.detail.as_deref().unwrap_or("unknown error")
                );
            } else {
                println!(
                    "OK: {} - {}",
                    outcome.job_id,
                    outcome.detail.as_deref().unwrap_or("done")
                );
            }
        }

        if args.abort_on_error && outcome.failed() {
            pb.finish_with_message("Aborted on error");
            anyhow::bail!(
                "Aborted: {} - {}",
                outcome.job_id,
                outcome.detail.as_deref().unwrap_or("unknown error")
            );
        }

        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_with_message("Done");

    // Summary
    let completed = outcomes
        .iter()
        .filter(|o| o.status == JobStatus::Phase0Complete)
        .count();
    let initialized = outcomes
        .iter()
        .filter(|o| o.status == JobStatus::Phase0Initialized)
        .count();
    let failed_validation = outcomes
        .iter()
        .filter(|o| o.status == JobStatus::FailedValidation)
        .count();
    let errored = outcomes
        .iter()
        .filter(|o| o.status == JobStatus::Error)
        .count();

    println!("\n========================================");
    println!("Phase 0 Summary:");
    println!("========================================");
    println!("  Completed:         {}", completed);
    println!("  Initialized:       {}", initialized);
    println!("  Failed validation: {}", failed_validation);
    println!("  Errored:           {}", errored);
    println!("  Total:             {}", outcomes.len());

    if failed_validation + errored > 0 {
        println!("\nFailed jobs:");
        for outcome in outcomes.iter().filter(|o| o.failed()) {
            println!(
                "  {} - {}",
                outcome.job_id,
                outcome.detail.as_deref().unwrap_or("see manifest")
            );
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Default workspace base when neither the CLI nor the payload names one.
const DEFAULT_OUTPUT_BASE: &str = "/data/outputs";

async fn run_job(
    client: &reqwest::Client,
    payload: &Value,
    base_override: Option<&Path>,
    skip_fetch: bool,
) -> Result<JobOutcome> {
    let job_id = payload
        .get("job_id")
        .and_then(Value::as_str)
        .unwrap_or("job_unknown")
        .to_string();

    let base_dir: PathBuf = base_override
        .map(Path::to_path_buf)
        .or_else(|| {
            payload
                .pointer("/io/output_base_dir")
                .and_then(Value::as_str)
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_BASE));

    let paths = JobPaths::new(base_dir.join(&job_id));
    fs::create_dir_all(&paths.root)
        .with_context(|| format!("Failed to create job root {}", paths.root.display()))?;

    workdir::append_log(&paths, "Phase0 start")?;
    workdir::append_log(&paths, &format!("job_id={}", job_id))?;
    workdir::append_log(&paths, &format!("output_base_dir={}", base_dir.display()))?;

    // Validation gates all further side effects; a failing payload still
    // gets a manifest for debugging.
    let errors = validate_payload(payload);
    if !errors.is_empty() {
        workdir::append_log(&paths, "VALIDATION FAILED:")?;
        for error in &errors {
            workdir::append_log(&paths, &format!("  - {}", error))?;
        }
        let manifest = Manifest::new(payload, paths.root.clone(), workdir::now_utc())
            .with_validation_errors(errors.iter().map(ToString::to_string).collect());
        workdir::write_manifest(&paths, &manifest)?;
        return Ok(JobOutcome {
            job_id,
            status: JobStatus::FailedValidation,
            detail: Some(format!("{} validation error(s)", errors.len())),
        });
    }

    workdir::create_tree(&paths)?;

    let mut manifest = Manifest::new(payload, paths.root.clone(), workdir::now_utc());
    let mut detail = "workspace initialized (no source image)".to_string();

    // Source image referenced by the first asset, when present.
    let source_url = payload
        .pointer("/assets/0/mj/image_url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty());

    if let Some(url) = source_url {
        if skip_fetch {
            workdir::append_log(&paths, "Skipping source image download (--skip-fetch)")?;
        } else {
            let source_path = paths.inputs.join("source.png");
            workdir::append_log(&paths, &format!("Downloading source image from: {}", url))?;
            match fetch::download_file(client, url, &source_path).await {
                Ok(()) => {
                    workdir::append_log(
                        &paths,
                        &format!("Saved source image: {}", source_path.display()),
                    )?;
                    manifest = manifest.with_status(JobStatus::Phase0Complete).with_file(
                        FileEntry {
                            path: source_path,
                            type_: "input".to_string(),
                            role: "source_image".to_string(),
                        },
                    );
                    detail = "source image fetched".to_string();
                }
                Err(e) => {
                    workdir::append_log(&paths, &format!("ERROR downloading image: {}", e))?;
                    manifest = manifest.with_error(format!("download_failed: {}", e));
                    detail = format!("download_failed: {}", e);
                }
            }
        }
    } else {
        workdir::append_log(&paths, "No source image URL in payload; nothing to fetch")?;
    }

    let status = manifest.status;
    workdir::write_manifest(&paths, &manifest)?;
    workdir::append_log(&paths, "Phase0 complete: folder tree + manifest written")?;

    Ok(JobOutcome {
        job_id,
        status,
        detail: Some(detail),
    })
}
