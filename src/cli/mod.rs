//! CLI module
//!
//! - `serve`: HTTP API over the configured evidence source
//! - `chat`: interactive session in the terminal
//! - `upgrade`: release-notes upgrade analysis

pub mod chat;
pub mod serve;
pub mod upgrade;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Adaptive RAG - dataset answers with verified web fallback
#[derive(Parser)]
#[command(name = "adaptive-rag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Ask questions interactively against a dataset
    Chat(chat::ChatArgs),

    /// Analyze release notes between two versions
    Upgrade(upgrade::UpgradeArgs),
}

/// Load `.env` and layered configuration, then install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
