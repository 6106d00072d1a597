use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::release_notes::{parse_release_notes, ChangeRecord, ReleaseVersion};
use crate::domain::DomainError;

/// Read one release-notes file per version and collect their change records
pub async fn load_release_notes(
    tool: &str,
    notes: &[(ReleaseVersion, PathBuf)],
) -> Result<Vec<ChangeRecord>, DomainError> {
    let mut records = Vec::new();

    for (version, path) in notes {
        let markdown = read_notes(path).await?;
        let parsed = parse_release_notes(&markdown, tool, version);

        debug!(%version, path = %path.display(), changes = parsed.len(), "Parsed release notes");

        records.extend(parsed);
    }

    Ok(records)
}

async fn read_notes(path: &Path) -> Result<String, DomainError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::not_found(format!(
            "Release notes '{}' could not be read: {}",
            path.display(),
            e
        ))
    })
}
