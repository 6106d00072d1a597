//! Chat command - one local session in the terminal

use std::path::PathBuf;

use clap::Args;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::domain::policy::{PolicyOutcome, PolicyRequest, Provenance, SessionState};

#[derive(Args)]
pub struct ChatArgs {
    /// Dataset to answer from (CSV, JSON or text); defaults to `knowledge.source_path`
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) applied to every question
    #[arg(long)]
    pub date: Option<String>,
}

pub async fn run(args: ChatArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let agent = crate::create_agent(&config, args.source.as_deref()).await?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = SessionState::new();

    stdout
        .write_all(b"Ask a question about your data ('exit' to quit).\n")
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let mut request = PolicyRequest::new(line);
        if let Some(date) = &args.date {
            request = request.with_reference_date(date.clone());
        }

        let (next, outcome) = agent.handle(session, &request).await;
        session = next;

        stdout.write_all(render(&outcome).as_bytes()).await?;
    }

    Ok(())
}

fn render(outcome: &PolicyOutcome) -> String {
    let mut text = format!("[{}] {}\n", outcome.decision, outcome.message);

    if let Provenance::Web { link: Some(link) } = &outcome.provenance {
        text.push_str(&format!("Source: {}\n", link));
    }

    text
}
