//! tradelog - Local trade journal CLI
//!
#![doc = "Main entry point for the tradelog application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tradelog::cli::{Cli, Commands};
use tradelog::commands;
use tradelog::config::Config;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration; the log format is only known afterwards, so
    // anything logged while loading goes through a plain stderr subscriber
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = tracing::subscriber::with_default(bootstrap_subscriber(cli.verbose), || {
        Config::load(config_path, &cli)
    })?;

    init_tracing(cli.verbose, config.logging.json);

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Session { command } => {
            tracing::info!("Starting session command");
            commands::session::handle_session(&config, command)?;
        }
        Commands::Trade { command } => {
            tracing::info!("Starting trade command");
            commands::trade::handle_trade(&config, command)?;
        }
        Commands::Export { output } => {
            tracing::info!("Starting export");
            commands::backup::run_export(&config, output)?;
        }
        Commands::Import { path, yes } => {
            tracing::info!("Starting import from {}", path.display());
            if yes {
                tracing::debug!("Import confirmation skipped");
            }
            commands::backup::run_import(&config, &path, yes)?;
        }
        Commands::Status => {
            commands::status::show_status(&config)?;
        }
    }

    Ok(())
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "tradelog=debug" } else { "tradelog=warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Scoped subscriber used while the configuration is being loaded
fn bootstrap_subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays clean for piping.
fn init_tracing(verbose: bool, json: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
