//! campreport CLI - Campaign Report Generator
//!
//! Imports a tracker export, classifies campaign rows, and writes the
//! formatted multi-sheet report. One invocation is one full, stateless
//! transform; outcomes are success-with-path, no-op (nothing to report),
//! or a fatal error.

mod config;
mod discover;
mod viewer;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use campreport_core::{classify_campaigns, SummaryStats};
use campreport_import::import_file;
use campreport_render::{write_report, ReportRenderer};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "campreport")]
#[command(author, version, about = "Campaign report generator", long_about = None)]
struct Cli {
    /// Input export file (skips discovery in the downloads folder)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Configuration file (created from a template if missing)
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "campaign_definitions.json"
    )]
    config: PathBuf,

    /// Folder scanned for the newest export (defaults to the user's Downloads)
    #[arg(long, value_name = "DIR")]
    downloads: Option<PathBuf>,

    /// Reject exports last modified more than this many days ago
    #[arg(long, value_name = "DAYS")]
    max_age_days: Option<u64>,

    /// Override the configured output folder
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Open the generated report in the default viewer
    #[arg(long)]
    open: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let (config, created) = Config::load_or_init(&cli.config)?;
    if created {
        println!("Created template config: {}", cli.config.display());
    } else {
        println!("Loaded campaign definitions from {}", cli.config.display());
    }

    let input = locate_input(cli)?;
    if let Some(max_age_days) = cli.max_age_days {
        let age = discover::file_age(&input)
            .with_context(|| format!("failed to stat {}", input.display()))?;
        if age > Duration::from_secs(max_age_days * 24 * 60 * 60) {
            bail!(
                "export {} is {} days old, older than the {} day limit",
                input.display(),
                age.as_secs() / 86_400,
                max_age_days
            );
        }
    }

    println!("Reading export: {}", input.display());
    let dataset = import_file(&input)
        .with_context(|| format!("failed to import {}", input.display()))?;
    println!("  {} total rows", dataset.len());

    let campaigns = classify_campaigns(&dataset);
    println!("  {} campaign rows", campaigns.len());

    if campaigns.is_empty() {
        println!("No campaigns found in export; nothing to report");
        return Ok(());
    }

    let stats = SummaryStats::compute(&dataset, &campaigns);

    let output_folder = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_settings.output_folder.clone());
    let filename = format!(
        "campaign_update_{}.xlsx",
        chrono::Local::now().format("%Y-%m-%d")
    );
    let output_path = output_folder.join(filename);

    let bytes = ReportRenderer::new().render_to_bytes(&dataset, &campaigns, &stats)?;
    let written = write_report(&bytes, &output_path)?;
    println!("Generated report: {}", written.display());

    if cli.open {
        viewer::open_in_viewer(&written);
    }

    Ok(())
}

/// Explicit input path, or the newest export in the downloads folder
fn locate_input(cli: &Cli) -> Result<PathBuf> {
    if let Some(input) = &cli.input {
        if !input.exists() {
            bail!("input file {} does not exist", input.display());
        }
        return Ok(input.clone());
    }

    let downloads = cli
        .downloads
        .clone()
        .or_else(dirs::download_dir)
        .context("no downloads folder to scan; pass --input or --downloads")?;

    discover::find_latest_export(&downloads, discover::EXPORT_NAME_HINT)
        .with_context(|| format!("failed to scan {}", downloads.display()))?
        .with_context(|| {
            format!(
                "no export containing {:?} found in {}",
                discover::EXPORT_NAME_HINT,
                downloads.display()
            )
        })
}
