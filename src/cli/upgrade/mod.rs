//! Upgrade command - release-notes analysis between two versions

use std::path::PathBuf;

use clap::Args;

use crate::domain::release_notes::{build_report, ReleaseVersion, UpgradeReport};
use crate::infrastructure::release_notes::{
    load_release_notes, GroundedExplainer, NO_CHANGES_MESSAGE,
};

#[derive(Args)]
pub struct UpgradeArgs {
    /// Tool the release notes belong to
    #[arg(long)]
    pub tool: String,

    /// Currently deployed version
    #[arg(long, value_parser = parse_version)]
    pub from: ReleaseVersion,

    /// Version to upgrade to
    #[arg(long, value_parser = parse_version)]
    pub to: ReleaseVersion,

    /// Release notes as `<version>=<path>`, repeatable
    #[arg(long = "notes", value_parser = parse_notes, required = true)]
    pub notes: Vec<(ReleaseVersion, PathBuf)>,

    /// Question that selects which changes to report
    #[arg(long, default_value = "full upgrade analysis")]
    pub question: String,

    /// Ask the LLM for an explanation grounded in the report
    #[arg(long)]
    pub explain: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: UpgradeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let records = load_release_notes(&args.tool, &args.notes).await?;
    let report = build_report(&records, &args.tool, &args.from, &args.to, &args.question)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }

    if args.explain {
        let providers = crate::create_providers(&config)?;
        let explainer = GroundedExplainer::new(providers.llm, &config.llm.model);
        let explanation = explainer.explain(&args.question, &report).await?;

        println!("\nExplanation:\n{}", explanation);
    }

    Ok(())
}

fn parse_version(value: &str) -> Result<ReleaseVersion, String> {
    ReleaseVersion::parse(value).map_err(|e| e.to_string())
}

fn parse_notes(value: &str) -> Result<(ReleaseVersion, PathBuf), String> {
    let (version, path) = value
        .split_once('=')
        .ok_or_else(|| format!("Expected <version>=<path>, got '{}'", value))?;

    if path.trim().is_empty() {
        return Err(format!("Missing path for version '{}'", version));
    }

    Ok((parse_version(version.trim())?, PathBuf::from(path.trim())))
}

fn render(report: &UpgradeReport) -> String {
    let mut text = format!(
        "{} {} -> {}\nRisk: {} ({} changes in range, focus: {})\n",
        report.tool,
        report.from,
        report.to,
        report.risk,
        report.total_changes,
        report.focus.as_str()
    );

    if report.changes.is_empty() {
        text.push_str(&format!("\n{}\n", NO_CHANGES_MESSAGE));
    } else {
        text.push_str("\nChanges:\n");
        for change in &report.changes {
            text.push_str(&format!(
                "  [{}] ({}) {}\n",
                change.version, change.category, change.description
            ));
        }
    }

    if !report.checklist.is_empty() {
        text.push_str("\nChecklist:\n");
        for item in &report.checklist {
            text.push_str(&format!("  - {}\n", item));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::release_notes::parse_release_notes;

    #[test]
    fn test_parse_notes() {
        let (version, path) = parse_notes("v1.29.0=notes/k8s-1.29.md").unwrap();

        assert_eq!(version, ReleaseVersion::parse("1.29.0").unwrap());
        assert_eq!(path, PathBuf::from("notes/k8s-1.29.md"));

        assert!(parse_notes("1.29.0").is_err());
        assert!(parse_notes("1.29.0=").is_err());
        assert!(parse_notes("latest=notes.md").unwrap_err().contains("Invalid version 'latest'"));
    }

    #[test]
    fn test_render_report() {
        let v129 = ReleaseVersion::parse("1.29.0").unwrap();
        let records = parse_release_notes("## Removed\n- legacy flag\n", "kubernetes", &v129);
        let from = ReleaseVersion::parse("1.28.0").unwrap();
        let report = build_report(&records, "kubernetes", &from, &v129, "full analysis").unwrap();

        let text = render(&report);

        assert!(text.starts_with("kubernetes 1.28.0 -> 1.29.0\n"));
        assert!(text.contains("[1.29.0] (removed) legacy flag"));
        assert!(text.contains("- Replace or remove usage of: legacy flag"));
    }
}
