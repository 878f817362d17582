//! CLI binary for idmerge: merge per-application accounts into people.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use idmerge_core::config::Config;
use idmerge_core::merge::{Merger, UnionStrategy};
use idmerge_core::storage::{self, DEFAULT_ACCOUNTS_FILE};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "idmerge", about = "Merge accounts that share an email into people")]
struct Cli {
    /// Directory containing idmerge.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge accounts and print the resulting people as JSON
    Merge {
        /// JSON file holding the list of accounts
        #[arg(default_value = DEFAULT_ACCOUNTS_FILE)]
        input: PathBuf,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Union strategy: raw-length, cluster-size
        #[arg(short, long)]
        strategy: Option<UnionStrategy>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show merge statistics without printing the people
    Stats {
        /// JSON file holding the list of accounts
        #[arg(default_value = DEFAULT_ACCOUNTS_FILE)]
        input: PathBuf,

        /// Union strategy: raw-length, cluster-size
        #[arg(short, long)]
        strategy: Option<UnionStrategy>,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let dir = match &cli.config {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to get current directory")?,
    };
    Config::load(&dir).context("failed to load configuration")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Merge {
            input,
            output,
            strategy,
            compact,
        } => {
            if let Some(strategy) = strategy {
                config.merge.strategy = strategy;
            }
            if compact {
                config.output.indent.clear();
            }
            cmd_merge(&input, output.as_deref(), &config)
        }
        Commands::Stats {
            input,
            strategy,
            json,
        } => {
            if let Some(strategy) = strategy {
                config.merge.strategy = strategy;
            }
            cmd_stats(&input, &config, json)
        }
    }
}

fn cmd_merge(input: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    let accounts = storage::load_accounts(input)?;
    let (people, report) = Merger::new(config.merge.strategy).merge_with_report(&accounts);
    tracing::info!(
        accounts = report.accounts,
        people = report.people,
        unions = report.unions,
        "merged accounts from {}",
        input.display()
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            storage::write_people(BufWriter::new(file), &people, &config.output.indent)?;
            tracing::info!("wrote {} people to {}", people.len(), path.display());
        }
        None => storage::write_people(io::stdout().lock(), &people, &config.output.indent)?,
    }
    Ok(())
}

fn cmd_stats(input: &Path, config: &Config, json: bool) -> Result<()> {
    let accounts = storage::load_accounts(input)?;
    let merger = Merger::new(config.merge.strategy);
    let (_, report) = merger.merge_with_report(&accounts);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Input: {}", input.display());
    println!("  Strategy: {}", merger.strategy());
    println!("  Accounts: {}", report.accounts);
    println!("  People: {}", report.people);
    println!("  Unions: {}", report.unions);
    println!("  Distinct emails: {}", report.distinct_emails);
    println!("  Distinct applications: {}", report.distinct_applications);
    Ok(())
}
