//! vs-dst-runner — CLI for running the DST targets with a chosen seed.
//!
//! # Usage
//!
//! ```bash
//! vs-dst-runner --target all --preset quick --seed 12345 --json
//! ```
//!
//! Exits with status 1 if any property is violated.

use std::process;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use vs_dst::{get_or_generate_seed, iterations_from_env, HarnessConfig};
use vs_runner::{run_target, Target};

/// Run the ring buffer and sorted search DST targets.
#[derive(Parser, Debug)]
#[command(name = "vs-dst-runner")]
#[command(about = "Deterministic simulation runner for verified sequence structures")]
struct Cli {
    /// Target to run: ring, search or all.
    #[arg(long, default_value = "all")]
    target: Target,

    /// DST seed (DST_SEED or random if not set).
    #[arg(long)]
    seed: Option<u64>,

    /// Number of operations per target (DST_ITERATIONS or the preset if not set).
    #[arg(long)]
    iterations: Option<u64>,

    /// Configuration preset: quick, default or stress.
    #[arg(long, default_value = "default")]
    preset: String,

    /// Print JSON instead of a text summary.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = HarnessConfig::preset(&cli.preset)
        .ok_or_else(|| anyhow!("Unknown preset: {}. Expected: quick, default, stress", cli.preset))?;
    let operations = match cli.iterations {
        Some(iterations) => iterations,
        None => iterations_from_env(config.operations).context("reading DST_ITERATIONS")?,
    };
    config = config.with_operations(operations);

    let seed = match cli.seed {
        Some(seed) => seed,
        None => get_or_generate_seed().context("reading DST_SEED")?,
    };

    let reports = run_target(cli.target, seed, &config).context("configuring DST runner")?;
    let all_passed = reports.iter().all(|r| r.passed());

    if cli.json {
        let output = json!({
            "target": cli.target,
            "preset": cli.preset,
            "seed": seed,
            "all_passed": all_passed,
            "reports": reports,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for report in &reports {
            println!("{}", report.format());
        }
    }

    if !all_passed {
        process::exit(1);
    }
    Ok(())
}
