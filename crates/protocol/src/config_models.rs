//! Client configuration models for `.agent-kit/config.toml`.
//!
//! Every section and field has a default, so an empty or missing file yields
//! a usable configuration pointing at a local backend.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Represents the settings from `.agent-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// # .agent-kit/config.toml
/// [server]
/// base_url = "https://onyx.example.com/api"
/// timeout_secs = 15
///
/// [endpoints]
/// pinned_items = "/user/pinned-items"
///
/// [ui]
/// focus_param = "assistantId"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the backend lives and how to authenticate against it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct ServerConfig {
    /// API root; endpoint paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request, if set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Backend paths, relative to `server.base_url`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct EndpointConfig {
    #[serde(default = "default_personas_path")]
    pub personas: String,

    #[serde(default = "default_user_groups_path")]
    pub user_groups: String,

    #[serde(default = "default_llm_providers_path")]
    pub llm_providers: String,

    /// Query parameter restricting the provider list to one agent.
    #[serde(default = "default_llm_provider_scope_param")]
    pub llm_provider_scope_param: String,

    /// Current user, carrying the explicit pin order.
    #[serde(default = "default_current_user_path")]
    pub current_user: String,

    #[serde(default = "default_pinned_items_path")]
    pub pinned_items: String,

    #[serde(default = "default_agent_preferences_path")]
    pub agent_preferences: String,

    /// Per-agent preference path; `{id}` is replaced by the agent ID.
    #[serde(default = "default_agent_preference_path")]
    pub agent_preference: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            personas: default_personas_path(),
            user_groups: default_user_groups_path(),
            llm_providers: default_llm_providers_path(),
            llm_provider_scope_param: default_llm_provider_scope_param(),
            current_user: default_current_user_path(),
            pinned_items: default_pinned_items_path(),
            agent_preferences: default_agent_preferences_path(),
            agent_preference: default_agent_preference_path(),
        }
    }
}

impl EndpointConfig {
    /// Resolve the per-agent preference path for `agent_id`.
    pub fn agent_preference_path(&self, agent_id: i64) -> String {
        self.agent_preference.replace("{id}", &agent_id.to_string())
    }
}

/// Front-end behaviour.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct UiConfig {
    /// Query parameter naming the currently focused agent.
    #[serde(default = "default_focus_param")]
    pub focus_param: String,

    /// Refetch cached collections when the backend becomes reachable again.
    #[serde(default = "default_true")]
    pub revalidate_on_reconnect: bool,

    /// Whether the deployment has the paid user-group features. When off,
    /// user-group pickers are not shown.
    #[serde(default = "default_true")]
    pub user_groups_enabled: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            focus_param: default_focus_param(),
            revalidate_on_reconnect: true,
            user_groups_enabled: true,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_personas_path() -> String {
    "/persona".to_string()
}

fn default_user_groups_path() -> String {
    "/manage/admin/user-group".to_string()
}

fn default_llm_providers_path() -> String {
    "/llm/provider".to_string()
}

fn default_llm_provider_scope_param() -> String {
    "persona_id".to_string()
}

fn default_current_user_path() -> String {
    "/me".to_string()
}

fn default_pinned_items_path() -> String {
    "/user/pinned-items".to_string()
}

fn default_agent_preferences_path() -> String {
    "/user/assistant/preferences".to_string()
}

fn default_agent_preference_path() -> String {
    "/user/assistant/{id}/preferences".to_string()
}

fn default_focus_param() -> String {
    "assistantId".to_string()
}

fn default_true() -> bool {
    true
}
