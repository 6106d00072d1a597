//! Release-notes loading and grounded explanation

mod explainer;
mod loader;

pub use explainer::{GroundedExplainer, NO_CHANGES_MESSAGE};
pub use loader::load_release_notes;
