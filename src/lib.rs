pub mod cli;
pub mod core;
pub mod server;

use crate::core::config::AppConfig;
use crate::core::{ConversionHandler, ConversionRequest};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    /// Run the HTTP server, optionally overriding the configured address
    Serve { listen: Option<SocketAddr> },
    /// Convert a single amount on the command line
    Convert {
        source: String,
        target: String,
        amount: String,
    },
    /// Print the active rate table
    Rates,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let table = config.rate_table()?;

    match command {
        AppCommand::Serve { listen } => {
            info!(currencies = ?table.codes(), "Exchange service starting...");
            let listen_addr = listen.unwrap_or(config.server.listen_addr);
            let handler = ConversionHandler::new(Arc::new(table));
            server::serve(listen_addr, handler).await
        }
        AppCommand::Convert {
            source,
            target,
            amount,
        } => {
            let handler = ConversionHandler::new(Arc::new(table));
            let request = ConversionRequest::new(&source, &target, &amount);
            cli::convert::run(&handler, &request)
        }
        AppCommand::Rates => {
            cli::rates::run(&table);
            Ok(())
        }
    }
}
