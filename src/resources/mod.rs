// Resource clients - stateless facades over the shared request executor
pub mod account;
pub mod configuration;
pub mod events;
pub mod services;
pub mod sessions;

pub use account::AccountClient;
pub use configuration::ConfigurationClient;
pub use events::EventsClient;
pub use services::ServicesClient;
pub use sessions::{SessionCreation, SessionsClient};
