//! Exchange version scanner CLI
//!
//! Fetches the Exchange Server build-numbers release notes, builds the
//! version tree and reports which builds are still supported.
//!
//! # Usage
//!
//! ```bash
//! # Fetch and write versions.yaml, versions.html and alive.json
//! exchange_versions scan --out-dir public
//!
//! # Use a local copy of the document
//! exchange_versions scan --input build-numbers-and-release-dates.md
//!
//! # Supported builds, one per line
//! exchange_versions alive
//!
//! # Tree in the terminal, including dead versions
//! exchange_versions show --all
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use exchange_versions::render::{alive_codes, Artifacts};
use exchange_versions::{fetch, forest_from_document, ScanConfig, VersionTree, Walk};

#[derive(Parser)]
#[command(name = "exchange_versions")]
#[command(version)]
#[command(about = "Build the Exchange Server version tree and list supported builds")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML configuration file
    #[arg(long, short, global = true, env = "EXCHANGE_VERSIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Evaluate liveness as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Args)]
struct Source {
    /// Read the release notes from a local markdown file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Fetch from this URL instead of the configured source
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the tree and write all artifacts
    Scan {
        #[command(flatten)]
        source: Source,

        /// Directory for versions.yaml, versions.html and alive.json
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print supported build codes, one per line
    Alive {
        #[command(flatten)]
        source: Source,
    },

    /// Print the version tree
    Show {
        #[command(flatten)]
        source: Source,

        /// Include dead versions
        #[arg(long)]
        all: bool,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScanConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Commands::Scan { source, out_dir } => cmd_scan(&config, today, &source, &out_dir).await,
        Commands::Alive { source } => cmd_alive(&config, today, &source).await,
        Commands::Show { source, all } => cmd_show(&config, today, &source, all).await,
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

async fn cmd_scan(
    config: &ScanConfig,
    today: NaiveDate,
    source: &Source,
    out_dir: &Path,
) -> Result<()> {
    let forest = load_forest(config, today, source).await?;
    let artifacts = Artifacts::render(&forest).context("Failed to render artifacts")?;
    let written = artifacts
        .write(out_dir, &config.outputs)
        .with_context(|| format!("Failed to write artifacts to {}", out_dir.display()))?;

    for path in written {
        println!("{} {}", "wrote".green(), path.display());
    }
    Ok(())
}

async fn cmd_alive(config: &ScanConfig, today: NaiveDate, source: &Source) -> Result<()> {
    let forest = load_forest(config, today, source).await?;
    for code in alive_codes(&forest) {
        println!("{}", code);
    }
    Ok(())
}

async fn cmd_show(config: &ScanConfig, today: NaiveDate, source: &Source, all: bool) -> Result<()> {
    let forest = load_forest(config, today, source).await?;
    for (depth, node) in Walk::new(&forest) {
        if !all && !node.is_alive() {
            continue;
        }
        if let Some(line) = describe(node) {
            let indent = "  ".repeat(depth);
            if node.is_alive() {
                println!("{}{}", indent, line.green());
            } else {
                println!("{}{}", indent, line.red());
            }
        }
    }
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

async fn load_forest(config: &ScanConfig, today: NaiveDate, source: &Source) -> Result<Vec<VersionTree>> {
    let text = match &source.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let url = source.url.as_deref().unwrap_or(&config.source_url);
            fetch::fetch_document(url)
                .await
                .with_context(|| format!("Failed to fetch {}", url))?
        }
    };

    forest_from_document(&text, config, today).context("Failed to build version tree")
}

fn describe(node: &VersionTree) -> Option<String> {
    if let Some(record) = node.record() {
        return Some(format!(
            "{}  {}  {}",
            record.code(),
            record.name(),
            record.date_string()
        ));
    }
    if node.name().is_empty() {
        return None;
    }
    Some(format!(
        "{}  {}  {}",
        node.wildcard_code(),
        node.name(),
        node.latest_release_string().unwrap_or_default()
    ))
}
