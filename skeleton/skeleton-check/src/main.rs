//! Joint limit check for persisted skeleton motion.
//!
//! Loads a motion file, evaluates every frame against the standard joint
//! limits and prints the violated parameters per frame.
//!
//! # Usage
//!
//! ```text
//! skeleton-check --motion_path output/merged_0/merged_0_skel.json
//! skeleton-check --motion_path motion.json --tolerance-deg 5
//! skeleton-check --motion_path motion.json --json > report.json
//! ```

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skeleton_limits::{
    EvalParams, LimitTable, SkeletonDefinition, analyze_motion_sequence_with, load_poses,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Check skeleton motion against anatomical joint limits.
#[derive(Parser)]
#[command(name = "skeleton-check")]
#[command(about = "Report joint-limit violations in a skeleton motion file", long_about = None)]
#[command(version)]
struct Cli {
    /// Motion file holding a "poses" array of 46-parameter frames
    #[arg(
        long = "motion_path",
        visible_alias = "motion-path",
        default_value = "output/merged_0/merged_0_skel.json"
    )]
    motion_path: PathBuf,

    /// Allowance added to both sides of every bound, in degrees
    #[arg(long, default_value_t = 0.0)]
    tolerance_deg: f64,

    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let poses = load_poses(&cli.motion_path)
        .with_context(|| format!("Failed to load poses from {}", cli.motion_path.display()))?;
    info!(frames = poses.frame_count(), "Successfully loaded poses");

    let skeleton = SkeletonDefinition::standard();
    let table = LimitTable::standard().context("Failed to build the standard limit table")?;
    let params = EvalParams::strict().tolerance_deg(cli.tolerance_deg);

    let analysis = analyze_motion_sequence_with(&poses, table, &skeleton, &params)
        .context("Joint limit analysis failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&analysis).context("Failed to serialize analysis")?
        );
    } else {
        print!("{}", report::render(&analysis));
    }

    Ok(())
}
