use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use photo_places::config;
use photo_places::pipeline::{self, Pipeline, RunStatus};
use photo_places::report::LogReporter;

#[derive(Parser, Debug)]
#[command(
    name = "photo-places",
    version,
    about = "Find where your photos were taken: read EXIF GPS tags and look up the nearest named place"
)]
struct Cli {
    /// Places API key
    #[arg(short, long, env = "PLACES_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Directory to search (default: /)
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output per-file results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    // Load config, then let flags win
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(key) = cli.key {
        config.places.api_key = key;
    }
    if let Some(directory) = cli.directory {
        config.scan.directory = directory;
    }

    if let Err(e) = config.validate() {
        log::error!("{e}");
        return Ok(ExitCode::from(pipeline::EXIT_MISSING_API_KEY));
    }

    let pipeline = Pipeline::from_config(&config)?;

    log::info!("Scanning {}", config.scan.directory.display());
    let summary = pipeline.run(&config.scan.directory, &mut LogReporter).await;

    // JSON output
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary.reports)?);
    }

    // Summary
    log::info!(
        "Done: {} files, {} images, {} located, {} failed",
        summary.files_seen,
        summary.images,
        summary.located,
        summary.failures
    );
    if summary.status == RunStatus::QuotaExceeded {
        log::error!("Stopped early: place search quota exhausted");
    }

    Ok(ExitCode::from(summary.status.exit_code()))
}
