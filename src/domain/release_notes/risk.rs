use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ChangeCategory, ChangeRecord};

/// Overall upgrade risk derived from weighted change categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn weight(category: ChangeCategory) -> u32 {
        match category {
            ChangeCategory::Removed => 5,
            ChangeCategory::Api => 4,
            ChangeCategory::Behavior => 3,
            ChangeCategory::Security => 3,
            ChangeCategory::Deprecated => 2,
        }
    }

    pub fn score(changes: &[ChangeRecord]) -> u32 {
        changes.iter().map(|c| Self::weight(c.category)).sum()
    }

    pub fn assess(changes: &[ChangeRecord]) -> Self {
        match Self::score(changes) {
            s if s >= 15 => Self::Critical,
            s if s >= 8 => Self::High,
            s if s >= 4 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
