use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::net::SocketAddr;
use xrate::core::log::{default_level, init_logging};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for xrate::AppCommand {
    fn from(cmd: Commands) -> xrate::AppCommand {
        match cmd {
            Commands::Serve { listen } => xrate::AppCommand::Serve { listen },
            Commands::Convert {
                source,
                target,
                amount,
            } => xrate::AppCommand::Convert {
                source,
                target,
                amount,
            },
            Commands::Rates => xrate::AppCommand::Rates,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the exchange HTTP server
    Serve {
        /// Address to listen on, overrides the configuration
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code, e.g. USD
        source: String,
        /// Target currency code, e.g. TWD
        target: String,
        /// Amount, thousands separators allowed, e.g. 1,000.50
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Display the exchange rate table
    Rates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let long_running = matches!(cli.command, Some(Commands::Serve { .. }));
    init_logging(default_level(cli.verbose, long_running));

    let result = match cli.command {
        Some(Commands::Setup) => xrate::cli::setup::setup(),
        Some(cmd) => xrate::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
