//! AM Group ERP shell: terminal front end for the access core.
//!
//! Loads configuration, initialises logging, and either runs the
//! interactive session or prints the access policy / configuration.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use erp_auth::AccessGate;
use erp_core::config::AppConfig;
use erp_core::result::AppResult;

mod console;
mod output;

use output::OutputFormat;

/// AM Group ERP role-gated navigation shell
#[derive(Debug, Parser)]
#[command(name = "erp-shell", version, about, long_about = None)]
struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(short, long, default_value = "config")]
    config_dir: String,

    /// Environment overlay to merge (`<config-dir>/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    env: String,

    /// Output format for non-interactive commands
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Subcommand to execute (defaults to `shell`)
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Clone, Copy, Subcommand)]
enum Commands {
    /// Start an interactive session
    Shell,
    /// Print the role-to-view access matrix
    Policy,
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_from(&cli.config_dir, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&cli, config).await {
        tracing::error!("Shell error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging on stderr so prompts keep stdout.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(cli: &Cli, config: AppConfig) -> AppResult<()> {
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            tracing::info!("Starting AM Group ERP shell v{}", env!("CARGO_PKG_VERSION"));
            console::run(config).await
        }
        Commands::Policy => output::print_policy(&AccessGate::new(), cli.format),
        Commands::Config => output::print_item(&config, cli.format),
    }
}
