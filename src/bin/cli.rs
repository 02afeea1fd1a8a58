//! jobwatch CLI
//!
//! Scans a markdown job table and emails new listings. Meant to be run
//! periodically by an external scheduler.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobwatch::{
    error::{AppError, Result},
    models::{Config, Credentials, Policy},
    pipeline::{self, Delivery, Outbox},
    storage::{LocalSeenStore, SeenStore},
};

/// jobwatch - Job Listing Watcher
#[derive(Parser, Debug)]
#[command(
    name = "jobwatch",
    version,
    about = "Emails new rows from markdown job tables"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "jobwatch.toml")]
    config: PathBuf,

    /// Novelty policy (overrides config)
    #[arg(long, global = true, value_enum)]
    policy: Option<Policy>,

    /// Markdown source file (overrides config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Seen-state file (overrides config)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan, email new rows, and record them
    Run,

    /// Scan and print the digest without sending or recording
    Preview,

    /// Validate configuration and source file
    Validate,

    /// Show paths and stored state
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    config.apply_overrides(cli.policy, cli.source, cli.state);

    let store = LocalSeenStore::new(&config.state.path);

    match cli.command {
        Command::Run => {
            config.validate()?;
            let outbox = Outbox::smtp(&config.mail, Credentials::from_env())?;
            pipeline::run_watch(&config, &store, outbox).await?;
        }

        Command::Preview => {
            config.validate()?;
            let summary = pipeline::run_watch(&config, &store, Outbox::Preview).await?;
            if let Delivery::Previewed(digest) = summary.delivery {
                println!("Subject: {}\n", digest.subject);
                println!("{}", digest.body.as_str());
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            if !config.source.path.exists() {
                log::error!("Source not found at {}", config.source.path.display());
                return Err(AppError::config("Source file not found"));
            }
            log::info!("✓ Source {} exists", config.source.path.display());

            match Credentials::from_env() {
                Ok(creds) => log::info!("✓ Mail credentials set (sending to {})", creds.to),
                Err(e) => log::warn!("{}", e),
            }

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Policy: {}", config.watch.policy);
            log::info!("Source: {}", config.source.path.display());

            match pipeline::read_source(&config.source.path).await {
                Ok(markdown) => log::info!(
                    "Candidate rows: {}",
                    pipeline::extract_rows(&markdown, config.watch.policy).len()
                ),
                Err(e) => log::warn!("{}", e),
            }

            log::info!("State: {}", store.path().display());
            if store.path().exists() {
                log::info!("Seen identifiers: {}", store.load().await.len());
            } else {
                log::info!("No state file yet.");
            }
        }
    }

    Ok(())
}
