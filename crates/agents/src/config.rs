use libcircles_utils::config::Config;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AgentsConfig {
    /// Agent behavior document to load when none is given explicitly.
    pub config_path: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            config_path: "agent_config.yaml".to_string(),
        }
    }
}

impl Config for AgentsConfig {
    fn section_name() -> &'static str {
        "agents"
    }
}
