use serde::{Deserialize, Serialize};

use super::{
    build_checklist, changes_between, ChangeRecord, QuestionFocus, ReleaseVersion, RiskLevel,
};
use crate::domain::DomainError;

/// Structured upgrade analysis between two versions of a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeReport {
    pub tool: String,
    pub from: ReleaseVersion,
    pub to: ReleaseVersion,
    /// Number of changes in range before focus filtering
    pub total_changes: usize,
    pub focus: QuestionFocus,
    /// Assessed on every change in range, regardless of focus
    pub risk: RiskLevel,
    /// Changes in range matching the focus
    pub changes: Vec<ChangeRecord>,
    pub checklist: Vec<String>,
}

pub fn build_report(
    records: &[ChangeRecord],
    tool: &str,
    from: &ReleaseVersion,
    to: &ReleaseVersion,
    question: &str,
) -> Result<UpgradeReport, DomainError> {
    let in_range: Vec<ChangeRecord> = changes_between(records, from, to)?
        .into_iter()
        .filter(|r| r.tool == tool)
        .collect();

    let focus = QuestionFocus::detect(question);

    Ok(UpgradeReport {
        tool: tool.to_string(),
        from: from.clone(),
        to: to.clone(),
        total_changes: in_range.len(),
        focus,
        risk: RiskLevel::assess(&in_range),
        checklist: build_checklist(&in_range),
        changes: focus.filter(&in_range),
    })
}
