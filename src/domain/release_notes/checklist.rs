use super::{ChangeCategory, ChangeRecord};

/// Action items for removed and deprecated changes, in input order
pub fn build_checklist(changes: &[ChangeRecord]) -> Vec<String> {
    changes
        .iter()
        .filter_map(|change| match change.category {
            ChangeCategory::Removed => {
                Some(format!("Replace or remove usage of: {}", change.description))
            }
            ChangeCategory::Deprecated => {
                Some(format!("Migrate deprecated item: {}", change.description))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::release_notes::ReleaseVersion;

    #[test]
    fn test_build_checklist() {
        let version = ReleaseVersion::parse("1.4.0").unwrap();
        let make = |category, description: &str| ChangeRecord {
            tool: "terraform".to_string(),
            version: version.clone(),
            category,
            description: description.to_string(),
        };

        let checklist = build_checklist(&[
            make(ChangeCategory::Removed, "legacy backend"),
            make(ChangeCategory::Security, "patched provider"),
            make(ChangeCategory::Deprecated, "-state flag"),
        ]);

        assert_eq!(
            checklist,
            vec![
                "Replace or remove usage of: legacy backend",
                "Migrate deprecated item: -state flag",
            ]
        );
    }
}
