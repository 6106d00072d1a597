//! Query analysis
//!
//! Cheap, deterministic classification of a user query before any external call:
//! greeting detection, numeric detection, keyword extraction and reference-date
//! validation.

mod intent;
mod keywords;
mod numeric;
mod reference_date;

pub use intent::is_greeting;
pub use keywords::extract_keywords;
pub use numeric::{is_numeric_query, normalize_numeric_answer};
pub use reference_date::parse_reference_date;
