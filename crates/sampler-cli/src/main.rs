//! solid-sampler - draw uniform random points inside solids.
//!
//! Reads a TOML run config, samples every solid it names and writes one
//! point table per solid, a combined table, a JSON summary and optional STL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sampler_cli::{run, Overrides, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "solid-sampler")]
#[command(about = "Sample random points inside solids", long_about = None)]
struct Cli {
    /// Run configuration (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Number of candidate points per solid
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    draws: Option<i64>,

    /// Seed for the random generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sample on all cores
    #[arg(long)]
    parallel: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            draws: self.draws,
            seed: self.seed,
            output: self.output.clone(),
            parallel: self.parallel,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = RunConfig::load(&cli.config)
        .and_then(|config| config.resolve(&cli.overrides()))
        .with_context(|| format!("Invalid config {}", cli.config.display()))?;

    let summary = run(&settings)?;

    for solid in &summary.solids {
        println!(
            "solid {:>3} {:<24} accepted {:>8} / {:<8} volume ~ {:.6}",
            solid.index, solid.name, solid.accepted, solid.draws, solid.estimated_volume
        );
    }
    println!(
        "{} points written to {}",
        summary.total_accepted(),
        settings.output.directory.display()
    );
    Ok(())
}
