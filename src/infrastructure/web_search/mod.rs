//! Web search provider implementations

mod serpapi;

pub use serpapi::SerpApiProvider;
