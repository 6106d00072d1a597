use adaptive_rag_agent::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Chat(args) => cli::chat::run(args).await,
        Command::Upgrade(args) => cli::upgrade::run(args).await,
    }
}
