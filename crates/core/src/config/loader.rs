//! Configuration file loader for the `.agent-kit/` directory.
//!
//! Resolution order:
//! 1. Defaults for every field
//! 2. `.agent-kit/config.toml`, if present
//! 3. `AGENT_KIT_BASE_URL` and `AGENT_KIT_API_KEY` from the environment

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use ak_protocol::config_models::ClientConfig;
use std::path::Path;
use tracing::debug;

pub const CONFIG_DIR: &str = ".agent-kit";
pub const CONFIG_FILE: &str = "config.toml";
pub const BASE_URL_ENV: &str = "AGENT_KIT_BASE_URL";
pub const API_KEY_ENV: &str = "AGENT_KIT_API_KEY";

/// Loads the client configuration for the project at `root`.
///
/// A missing `.agent-kit/` directory or `config.toml` yields the defaults,
/// not an error.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, or
/// if the resolved values fail [`validate`].
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    load_config_with(root, |name| std::env::var(name).ok()).await
}

/// [`load_config`] with an explicit environment lookup.
pub async fn load_config_with<F>(root: &Path, env: F) -> ConfigResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    let mut config = if config_path.exists() {
        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
                path: config_path.clone(),
                source,
            })?;

        let client: ClientConfig =
            toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
                path: config_path.clone(),
                source,
            })?;

        debug!(path = %config_path.display(), "loaded config file");
        AppConfig {
            client,
            source: Some(config_path),
        }
    } else {
        debug!(root = %root.display(), "no config file, using defaults");
        AppConfig::default()
    };

    apply_env_overrides(&mut config.client, env);
    validate(&config)?;
    Ok(config)
}

/// Overlay environment variables on `client`. Empty values are ignored.
pub fn apply_env_overrides<F>(client: &mut ClientConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = non_empty(BASE_URL_ENV) {
        debug!(%base_url, "base URL overridden from environment");
        client.server.base_url = base_url;
    }
    if let Some(api_key) = non_empty(API_KEY_ENV) {
        client.server.api_key = Some(api_key);
    }
}

/// Reject values the client cannot work with.
pub fn validate(config: &AppConfig) -> ConfigResult<()> {
    let client = &config.client;
    let invalid = |reason: String| ConfigError::InvalidConfig {
        path: config.origin(),
        reason,
    };

    if client.server.base_url.trim().is_empty() {
        return Err(invalid("server.base_url must not be empty".to_string()));
    }
    if client.server.timeout_secs == 0 {
        return Err(invalid(
            "server.timeout_secs must be greater than zero".to_string(),
        ));
    }

    let endpoints = &client.endpoints;
    let paths = [
        ("personas", &endpoints.personas),
        ("user_groups", &endpoints.user_groups),
        ("llm_providers", &endpoints.llm_providers),
        ("current_user", &endpoints.current_user),
        ("pinned_items", &endpoints.pinned_items),
        ("agent_preferences", &endpoints.agent_preferences),
        ("agent_preference", &endpoints.agent_preference),
    ];
    for (name, path) in paths {
        if !path.starts_with('/') {
            return Err(invalid(format!(
                "endpoints.{name} must start with '/', got {path:?}"
            )));
        }
    }
    if !endpoints.agent_preference.contains("{id}") {
        return Err(invalid(
            "endpoints.agent_preference must contain an {id} placeholder".to_string(),
        ));
    }
    if endpoints.llm_provider_scope_param.is_empty() {
        return Err(invalid(
            "endpoints.llm_provider_scope_param must not be empty".to_string(),
        ));
    }
    if client.ui.focus_param.is_empty() {
        return Err(invalid("ui.focus_param must not be empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(root: &Path, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).expect("Failed to create .agent-kit");
        fs::write(dir.join(CONFIG_FILE), content).expect("Failed to write config.toml");
    }

    #[tokio::test]
    async fn test_load_config_full() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(
            dir.path(),
            r#"
[server]
base_url = "https://onyx.example.com/api"
api_key = "secret"
timeout_secs = 5

[endpoints]
pinned_items = "/user/pinned-assistants"

[ui]
focus_param = "personaId"
revalidate_on_reconnect = false
user_groups_enabled = false
"#,
        );

        let config = load_config_with(dir.path(), no_env)
            .await
            .expect("Failed to load config");

        assert_eq!(config.client.server.base_url, "https://onyx.example.com/api");
        assert_eq!(config.client.server.api_key.as_deref(), Some("secret"));
        assert_eq!(config.client.server.timeout_secs, 5);
        assert_eq!(config.client.endpoints.pinned_items, "/user/pinned-assistants");
        assert_eq!(config.client.endpoints.personas, "/persona");
        assert_eq!(config.client.ui.focus_param, "personaId");
        assert!(!config.client.ui.revalidate_on_reconnect);
        assert!(!config.client.ui.user_groups_enabled);
        assert!(config
            .source
            .as_ref()
            .is_some_and(|p| p.ends_with("config.toml")));
    }

    #[tokio::test]
    async fn test_load_config_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        let config = load_config_with(dir.path(), no_env)
            .await
            .expect("Should handle missing .agent-kit");

        assert_eq!(config, AppConfig::default());
        assert!(config.source.is_none());
    }

    #[tokio::test]
    async fn test_load_config_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[server\nbase_url = ");

        let result = load_config_with(dir.path(), no_env).await;
        if let Err(ConfigError::TomlParse { path, .. }) = result {
            assert!(path.ends_with("config.toml"));
        } else {
            panic!("Expected TomlParse error");
        }
    }

    #[tokio::test]
    async fn test_load_config_rejects_zero_timeout() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[server]\ntimeout_secs = 0\n");

        let result = load_config_with(dir.path(), no_env).await;
        match result {
            Err(ConfigError::InvalidConfig { reason, .. }) => {
                assert!(reason.contains("timeout_secs"));
            }
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_config_rejects_relative_path() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[endpoints]\npersonas = \"persona\"\n");

        let result = load_config_with(dir.path(), no_env).await;
        match result {
            Err(ConfigError::InvalidConfig { reason, .. }) => {
                assert!(reason.contains("endpoints.personas"));
            }
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_env_overrides_file_values() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "[server]\nbase_url = \"http://file/api\"\n");

        let env: HashMap<&str, &str> = [
            (BASE_URL_ENV, "http://env/api"),
            (API_KEY_ENV, "from-env"),
        ]
        .into_iter()
        .collect();

        let config = load_config_with(dir.path(), |name| env.get(name).map(|v| v.to_string()))
            .await
            .expect("Failed to load config");

        assert_eq!(config.client.server.base_url, "http://env/api");
        assert_eq!(config.client.server.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut client = ClientConfig::default();
        apply_env_overrides(&mut client, |_| Some("  ".to_string()));
        assert_eq!(client, ClientConfig::default());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = AppConfig::default();
        config.client.server.base_url = String::new();

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("<defaults>"));
        assert!(err.to_string().contains("base_url"));
    }
}
