//! Tagged-line classification of release notes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ReleaseVersion;

/// Kind of change a release-notes section describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Deprecated,
    Removed,
    Api,
    Behavior,
    Security,
}

impl ChangeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deprecated => "deprecated",
            Self::Removed => "removed",
            Self::Api => "api",
            Self::Behavior => "behavior",
            Self::Security => "security",
        }
    }

    /// Detect the category named by a heading, first match wins
    fn from_heading(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();

        if lower.contains("deprecat") {
            Some(Self::Deprecated)
        } else if lower.contains("removed") || lower.contains("removal") {
            Some(Self::Removed)
        } else if lower.contains("api change") {
            Some(Self::Api)
        } else if lower.contains("behavior change") || lower.contains("behaviour change") {
            Some(Self::Behavior)
        } else if lower.contains("security") {
            Some(Self::Security)
        } else {
            None
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single release-notes line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTag {
    /// Markdown heading or `Label:` line, with the category it opens if any
    Heading(Option<ChangeCategory>),
    /// Bullet item text without its marker
    Item(String),
    Blank,
    Text,
}

pub fn classify_line(line: &str) -> LineTag {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineTag::Blank;
    }

    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        let text = rest.trim();
        return if text.is_empty() {
            LineTag::Blank
        } else {
            LineTag::Item(text.to_string())
        };
    }

    if trimmed.starts_with('#') || trimmed.ends_with(':') {
        let text = trimmed.trim_start_matches('#').trim_end_matches(':');
        return LineTag::Heading(ChangeCategory::from_heading(text));
    }

    LineTag::Text
}

/// One categorized change of a tool release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub tool: String,
    pub version: ReleaseVersion,
    pub category: ChangeCategory,
    pub description: String,
}

/// Extract categorized bullets; bullets outside a categorized section are ignored
pub fn parse_release_notes(
    markdown: &str,
    tool: &str,
    version: &ReleaseVersion,
) -> Vec<ChangeRecord> {
    let mut section: Option<ChangeCategory> = None;
    let mut records = Vec::new();

    for line in markdown.lines() {
        match classify_line(line) {
            LineTag::Heading(category) => section = category,
            LineTag::Item(text) => {
                if let Some(category) = section {
                    records.push(ChangeRecord {
                        tool: tool.to_string(),
                        version: version.clone(),
                        category,
                        description: text,
                    });
                }
            }
            LineTag::Blank | LineTag::Text => {}
        }
    }

    records
}
