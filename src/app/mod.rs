//! Application setup: configuration, credentials and client wiring

pub mod config;
pub mod credentials;
pub mod loader;
pub mod providers;

pub use config::{AppConfig, ConfigError};
pub use credentials::{credential_status, Credentials, SERPER_KEY_VAR};
pub use loader::load_config;
pub use providers::build_engine;
