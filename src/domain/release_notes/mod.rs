//! Release-notes upgrade analysis
//!
//! Turns markdown release notes into categorized change records, selects the
//! changes between two versions and derives a risk level and a checklist.

mod checklist;
mod classifier;
mod question;
mod report;
mod risk;
mod version;

pub use checklist::build_checklist;
pub use classifier::{classify_line, parse_release_notes, ChangeCategory, ChangeRecord, LineTag};
pub use question::QuestionFocus;
pub use report::{build_report, UpgradeReport};
pub use risk::RiskLevel;
pub use version::{changes_between, ReleaseVersion};
