//! Starmap command-line entry point

use anyhow::Context;
use clap::Parser;
use starmap::config::{load_config_with_hash, Config};
use starmap::fetch::run_fetch;
use starmap::output::write_snapshot;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Starmap: a universe map snapshot fetcher
///
/// Fetches every solar system listed by a read-only map API, follows the
/// stargate references inside each system record, and writes both
/// collections into one JSON snapshot document.
#[derive(Parser, Debug)]
#[command(name = "starmap", version, about = "Fetch a universe map snapshot")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the fetch plan without issuing requests
    #[arg(long)]
    dry_run: bool,

    /// Override the configured snapshot output path
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let (mut config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("loaded {} (sha256 {})", cli.config.display(), hash);

    if let Some(path) = &cli.output {
        config.output.snapshot_path = path.display().to_string();
    }

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    run(&config).await
}

/// Installs the tracing subscriber; `-v` widens the filter, `-q` drops
/// everything below error
fn init_logging(verbose: u8, quiet: bool) {
    let directives = if quiet {
        "error"
    } else {
        match verbose {
            0 => "starmap=info,warn",
            1 => "starmap=debug,info",
            2 => "starmap=trace,debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(false)
        .init();
}

/// Prints what a run with this configuration would do, without any
/// network activity
fn print_plan(config: &Config) {
    println!("starmap dry run");
    println!();
    println!(
        "endpoint   https://{}/{}/",
        config.api.host, config.api.version
    );
    println!(
        "fetch      {} workers, {} attempts per resource",
        config.fetch.workers, config.fetch.max_retries
    );
    println!(
        "pacing     {}/s per worker ({}/s aggregate), retry {}s, reopen {}s",
        config.fetch.request_rate,
        config.fetch.request_rate * config.fetch.workers as f64,
        config.fetch.retry_timeout_secs,
        config.fetch.reopen_timeout_secs
    );
    println!("snapshot   {}", config.output.snapshot_path);
    println!();
    println!("config ok; would fetch the system listing and every referenced stargate");
}

/// Runs the full fetch and writes the snapshot
async fn run(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "fetching https://{}/{}/ with {} workers",
        config.api.host,
        config.api.version,
        config.fetch.workers
    );

    let snapshot = run_fetch(config).await?;
    tracing::info!(
        "fetched {} systems and {} stargates",
        snapshot.systems.len(),
        snapshot.stargates.len()
    );

    let path = Path::new(&config.output.snapshot_path);
    write_snapshot(&snapshot, path)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    tracing::info!("snapshot written to {}", path.display());

    Ok(())
}
