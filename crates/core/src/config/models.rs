//! The loaded configuration and where it came from.

use ak_protocol::config_models::ClientConfig;
use std::path::PathBuf;

/// Client configuration resolved from `.agent-kit/config.toml` and the
/// environment.
///
/// # Example
///
/// ```rust,no_run
/// use ak_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Backend at {}", config.client.server.base_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub client: ClientConfig,

    /// The file the settings were read from; `None` when defaults were used.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Label for error messages: the source file, or `<defaults>`.
    pub fn origin(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| PathBuf::from("<defaults>"))
    }
}
