//! Configuration loading and management.
//!
//! Settings come from `.agent-kit/config.toml` under a project root, with
//! environment overrides for the backend location and credentials.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::{apply_env_overrides, load_config, validate};
pub use models::AppConfig;
