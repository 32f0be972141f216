pub mod constants;
pub mod decode;
pub mod error;
pub mod payload;

pub use decode::Decoded;
pub use error::{RegistryError, Result};
pub use payload::{ErrorPayload, ListOptions};
