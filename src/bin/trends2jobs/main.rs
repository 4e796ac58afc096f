//! CLI tool to transform trend-planner wrapper JSON into normalized job
//! payloads.
//!
//! Usage:
//!   trends2jobs --input raw.json --output jobs.json --collection-id LL_2026-02-10 --difficulty intermediate

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use trendfactory::{build_job, extract_trends};

#[derive(Parser, Debug)]
#[command(
    name = "trends2jobs",
    about = "Transform trend-planner wrapper JSON into normalized job payloads",
    version
)]
struct Args {
    /// Input wrapper JSON file (raw planner response or plain trend array)
    #[arg(short, long)]
    input: PathBuf,

    /// Output path for the job payload array
    #[arg(short, long)]
    output: PathBuf,

    /// Collection identifier, e.g. LL_2026-02-10
    #[arg(short, long)]
    collection_id: String,

    /// Difficulty tier to build jobs for
    #[arg(
        short,
        long,
        default_value = "intermediate",
        value_parser = ["kids", "beginner", "intermediate", "advanced"]
    )]
    difficulty: String,

    /// Base directory the execution layer writes job workspaces under
    #[arg(long, env = "OUTPUT_BASE_DIR", default_value = "/data/outputs")]
    output_base_dir: PathBuf,

    /// Cap on processed trends (0 = all)
    #[arg(long, default_value = "0")]
    limit: usize,

    /// Print statistics about the transformation
    #[arg(long, default_value = "false")]
    stats: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Validate input exists
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    // 2. Read wrapper JSON
    let raw_content =
        std::fs::read_to_string(&args.input).context("Failed to read input file")?;
    let wrapper: serde_json::Value =
        serde_json::from_str(&raw_content).context("Failed to parse input JSON")?;

    // 3. Extract the embedded trend records
    let mut trends = extract_trends(&wrapper).context("Failed to extract trends")?;
    let total_trends = trends.len();

    // 4. Apply trend limit
    if args.limit > 0 {
        trends.truncate(args.limit);
    }

    // 5. Build one job per trend
    let jobs: Vec<_> = trends
        .iter()
        .map(|trend| {
            build_job(
                trend,
                &args.collection_id,
                &args.difficulty,
                &args.output_base_dir,
            )
        })
        .collect();

    // 6. Write the payload array
    let json = serde_json::to_string_pretty(&jobs).context("Failed to serialize job payloads")?;
    std::fs::write(&args.output, json).context("Failed to write output file")?;

    // 7. Optional stats
    if args.stats {
        let total_assets: usize = jobs.iter().map(|j| j.assets.len()).sum();
        let generated: usize = jobs
            .iter()
            .flat_map(|j| j.assets.iter())
            .filter(|a| a.generator.is_some())
            .count();

        println!();
        println!("Transformation statistics:");
        println!("  Collection:  {}", args.collection_id);
        println!("  Difficulty:  {}", args.difficulty);
        println!();
        println!("  Trends found:     {}", total_trends);
        println!("  Jobs built:       {}", jobs.len());
        println!("  Assets:           {}", total_assets);
        println!("  Generated assets: {}", generated);
    }

    println!();
    println!(
        "Wrote {} job payload(s) to {}",
        jobs.len(),
        args.output.display()
    );

    Ok(())
}
