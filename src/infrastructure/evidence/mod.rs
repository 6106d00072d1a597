//! Evidence store implementations and corpus loading

mod chunker;
mod in_memory;
mod loader;

pub use chunker::FixedSizeChunker;
pub use in_memory::InMemoryEvidenceStore;
pub use loader::{load_passages, parse_passages, SourceFormat};
