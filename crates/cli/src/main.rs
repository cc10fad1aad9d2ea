//! Hectic CLI - hectic command

use anyhow::Result;
use clap::{Parser, Subcommand};
use hectic_core::FeedbackKind;
use tracing::Level;

mod cmd;
mod system_config;
mod util;

/// Hectic - debounced haptic feedback
#[derive(Parser)]
#[command(name = "hectic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every pass/delay decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perform feedback one or more times from a single caller
    Perform {
        /// Feedback kind (generic, alignment, level-change)
        kind: FeedbackKind,
        /// Number of requests (default: 1)
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
        /// Pause between requests in milliseconds (default: 0)
        #[arg(short, long, default_value = "0")]
        interval_ms: u64,
        /// Override the configured minimum delay
        #[arg(long, allow_hyphen_values = true)]
        min_delay_ms: Option<i64>,
        /// Run each request on the blocking pool instead of inline
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Fire many concurrent requests through the dispatch queue
    Burst {
        /// Number of requests (default: 50)
        #[arg(short = 'n', long, default_value = "50")]
        requests: usize,
        /// Spread random arrivals over this many milliseconds (default: 500)
        #[arg(long, default_value = "500")]
        spread_ms: u64,
        /// Override the configured minimum delay
        #[arg(long, allow_hyphen_values = true)]
        min_delay_ms: Option<i64>,
        /// Seed for arrival times and kinds
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Perform once, then wait out the window and perform again
    Wait {
        /// Feedback kind (generic, alignment, level-change)
        kind: FeedbackKind,
        /// Override the configured minimum delay
        #[arg(long, allow_hyphen_values = true)]
        min_delay_ms: Option<i64>,
    },
    /// View and edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Get a single value
    Get {
        /// Key (min_delay_ms, trace_decisions, trace_level)
        key: String,
    },
    /// Set a single value
    Set {
        /// Key (min_delay_ms, trace_decisions, trace_level)
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Show the config file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an example configuration
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    match cli.command {
        Commands::Perform { kind, count, interval_ms, min_delay_ms, run_async } => {
            cmd::perform::run(kind, count, interval_ms, min_delay_ms, run_async).await
        }
        Commands::Burst { requests, spread_ms, min_delay_ms, seed } => {
            cmd::burst::run(requests, spread_ms, min_delay_ms, seed).await
        }
        Commands::Wait { kind, min_delay_ms } => cmd::wait::run(kind, min_delay_ms).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list().await,
            ConfigCommands::Get { key } => cmd::config::run_get(&key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value).await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
