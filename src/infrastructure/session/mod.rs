mod registry;

pub use registry::{SessionRegistry, SessionRegistryConfig};
