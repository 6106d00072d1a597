use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ChangeRecord;
use crate::domain::DomainError;

/// Dotted numeric release version, `v` prefix optional
///
/// Missing trailing components compare as zero, so `1.22 == 1.22.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReleaseVersion {
    raw: String,
    parts: Vec<u64>,
}

impl ReleaseVersion {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let raw = input.trim();
        let digits = raw
            .strip_prefix('v')
            .or_else(|| raw.strip_prefix('V'))
            .unwrap_or(raw);

        let parts = digits
            .split('.')
            .map(|p| p.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                DomainError::validation(format!(
                    "Invalid version '{}'. Expected dotted numbers such as 1.29.0",
                    input
                ))
            })?;

        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReleaseVersion {}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReleaseVersion> for String {
    fn from(value: ReleaseVersion) -> Self {
        value.raw
    }
}

/// Changes released after `current` up to and including `target`
pub fn changes_between(
    records: &[ChangeRecord],
    current: &ReleaseVersion,
    target: &ReleaseVersion,
) -> Result<Vec<ChangeRecord>, DomainError> {
    if current > target {
        return Err(DomainError::validation(format!(
            "Current version {} is newer than target version {}",
            current, target
        )));
    }

    Ok(records
        .iter()
        .filter(|r| &r.version > current && &r.version <= target)
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::release_notes::ChangeCategory;

    fn v(s: &str) -> ReleaseVersion {
        ReleaseVersion::parse(s).unwrap()
    }

    fn record(version: &str) -> ChangeRecord {
        ChangeRecord {
            tool: "kubernetes".to_string(),
            version: v(version),
            category: ChangeCategory::Removed,
            description: format!("change in {}", version),
        }
    }

    #[test]
    fn test_parse_and_compare() {
        assert!(v("v1.22.0") < v("1.23"));
        assert!(v("1.9") < v("1.10"));
        assert_eq!(v("1.22"), v("v1.22.0"));
        assert_eq!(v("v1.22.0").to_string(), "v1.22.0");
    }

    #[test]
    fn test_invalid_versions() {
        for input in ["", "v", "1..2", "1.x", "latest"] {
            let err = ReleaseVersion::parse(input).unwrap_err();
            assert!(err.to_string().contains("Invalid version"), "{}", input);
        }
    }

    #[test]
    fn test_changes_between_is_half_open() {
        let records = vec![record("1.27.0"), record("1.28.0"), record("1.29.0"), record("1.30.0")];

        let selected = changes_between(&records, &v("1.27.0"), &v("1.29.0")).unwrap();
        let versions: Vec<_> = selected.iter().map(|r| r.version.to_string()).collect();

        assert_eq!(versions, vec!["1.28.0", "1.29.0"]);
    }

    #[test]
    fn test_changes_between_rejects_downgrade() {
        assert!(changes_between(&[], &v("1.30"), &v("1.29")).is_err());
        assert!(changes_between(&[], &v("1.29"), &v("1.29")).unwrap().is_empty());
    }

    #[test]
    fn test_serde_as_string() {
        assert_eq!(serde_json::to_string(&v("v1.2.3")).unwrap(), "\"v1.2.3\"");
        let parsed: ReleaseVersion = serde_json::from_str("\"1.2\"").unwrap();
        assert_eq!(parsed, v("1.2.0"));
        assert!(serde_json::from_str::<ReleaseVersion>("\"abc\"").is_err());
    }
}
