use std::path::Path;

use libcircles_utils::log::{debug, info};

use crate::{descriptor::AgentConfig, error::AgentConfigError};

impl AgentConfig {
    /// Parses and validates a document. Nothing is returned unless the
    /// whole document is valid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AgentConfigError> {
        let cfg: AgentConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        debug!(
            profiles = cfg.profiles.len(),
            agents = cfg.total_agents().unwrap_or(u64::MAX),
            "agent config validated"
        );
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AgentConfigError> {
        let path = path.as_ref();
        info!("loading agent config from {}", path.display());
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}
