// Module declarations
mod builder;
mod core;

// Public API exports
pub use builder::{RegistryClientBuilder, RegistryClientOptions};
pub use core::RegistryClient;
