use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

/// Relay Offer Extractor
#[derive(Parser)]
#[command(name = "relay-offers")]
#[command(about = "Extract swap offers from relay message streams")]
#[command(version)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Extract offers from a saved JSON list of relay messages
    Extract(commands::extract::ExtractCommand),
    /// Subscribe to a relay node and list offers, optionally polling
    Fetch(commands::fetch::FetchCommand),
    /// Publish an offer in the native format
    Post(commands::post::PostCommand),
    /// Print the effective configuration as TOML
    Config(commands::config::ConfigCommand),
}

pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error", or "debug" with --verbose)
    let default_level = if cli.verbose { "debug" } else { "error" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();

    match cli.command {
        Commands::Extract(command) => command.run(),
        Commands::Fetch(command) => command.run().await,
        Commands::Post(command) => command.run().await,
        Commands::Config(command) => command.run(),
    }
}
