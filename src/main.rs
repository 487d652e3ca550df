//! `txpix` CLI - render text files to PNG cards and fetch passages from Airtable

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::error;
use tracing_subscriber::EnvFilter;

use txpix::{airtable, batch, Config, Font, Pipeline};

#[derive(Parser)]
#[command(name = "txpix")]
#[command(about = "Turn plain text into fixed-size image cards")]
#[command(version)]
struct Cli {
    /// Seed for picking background images, for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every .txt file below a directory into images
    Generate {
        /// Directory to search for text files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Configuration file
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },

    /// Download passages from Airtable as .txt files
    Fetch {
        /// Directory to save the text files in
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Configuration file
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(err) = run(Cli::parse()) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate { dir, config } => cmd_generate(&dir, &config, cli.seed),
        Commands::Fetch { dir, config } => cmd_fetch(&dir, &config),
    }
}

fn cmd_generate(dir: &Path, config_path: &Path, seed: Option<u64>) -> Result<()> {
    let config = Config::load(config_path)?;
    let font = Font::from_config(config.font_file.as_deref()).context("loading font")?;
    let pipeline = Pipeline::new(&config, font)
        .with_context(|| format!("invalid configuration in {}", config_path.display()))?;

    let seed = seed.unwrap_or_else(time_seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let report = batch::render_directory(&pipeline, dir, &config.output_dir, &mut rng)
        .with_context(|| format!("rendering {}", dir.display()))?;
    println!(
        "{} documents rendered, {} skipped, {} images written",
        report.rendered, report.skipped, report.pages
    );
    Ok(())
}

fn cmd_fetch(dir: &Path, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let files = airtable::fetch_text_files(&config.airtable).context("fetching from Airtable")?;
    let written = batch::write_text_files(dir, &files);
    println!("{} of {} text files saved", written.len(), files.len());
    Ok(())
}

/// Nanoseconds since the epoch
fn time_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros()) as u64
}
