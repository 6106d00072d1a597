use serde::{Deserialize, Serialize};

use super::{ChangeCategory, ChangeRecord};

/// What an upgrade question is mainly about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFocus {
    Breaking,
    Deprecated,
    Security,
    Checklist,
    #[default]
    Full,
}

impl QuestionFocus {
    /// Keyword detection, first match wins
    pub fn detect(question: &str) -> Self {
        let q = question.to_lowercase();

        if q.contains("break") {
            Self::Breaking
        } else if q.contains("deprecat") {
            Self::Deprecated
        } else if q.contains("security") || q.contains("cve") {
            Self::Security
        } else if q.contains("checklist") {
            Self::Checklist
        } else {
            Self::Full
        }
    }

    pub fn includes(&self, category: ChangeCategory) -> bool {
        use ChangeCategory::*;

        match self {
            Self::Breaking => matches!(category, Removed | Api | Behavior),
            Self::Deprecated => category == Deprecated,
            Self::Security => category == Security,
            Self::Checklist => matches!(category, Removed | Deprecated),
            Self::Full => true,
        }
    }

    pub fn filter(&self, changes: &[ChangeRecord]) -> Vec<ChangeRecord> {
        changes
            .iter()
            .filter(|c| self.includes(c.category))
            .cloned()
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breaking => "breaking",
            Self::Deprecated => "deprecated",
            Self::Security => "security",
            Self::Checklist => "checklist",
            Self::Full => "full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(QuestionFocus::detect("Will anything break?"), QuestionFocus::Breaking);
        assert_eq!(QuestionFocus::detect("What is deprecated?"), QuestionFocus::Deprecated);
        assert_eq!(QuestionFocus::detect("Any security fixes"), QuestionFocus::Security);
        assert_eq!(QuestionFocus::detect("Give me a checklist"), QuestionFocus::Checklist);
        assert_eq!(QuestionFocus::detect("Summarize the upgrade"), QuestionFocus::Full);
        assert_eq!(QuestionFocus::detect(""), QuestionFocus::Full);
    }

    #[test]
    fn test_includes() {
        assert!(QuestionFocus::Breaking.includes(ChangeCategory::Api));
        assert!(!QuestionFocus::Breaking.includes(ChangeCategory::Deprecated));
        assert!(QuestionFocus::Checklist.includes(ChangeCategory::Deprecated));
        assert!(QuestionFocus::Full.includes(ChangeCategory::Security));
    }
}
