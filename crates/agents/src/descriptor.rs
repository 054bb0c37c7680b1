//! Schema of the agent behavior document.
//!
//! The document is plain configuration: it is loaded once when a
//! simulation starts and never mutated afterwards. `constraints` and
//! `params` are passed through untouched to whatever executes the action.

use indexmap::IndexMap;
use libcircles_core::types::Address;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Mapping;

/// A key whose entries are all commented out parses as null.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_repeat() -> u64 {
    1
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub simulation_params: Mapping,

    /// Profile name to relative weight.
    #[serde(default, deserialize_with = "null_as_default")]
    pub agent_distribution: IndexMap<String, u64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub profiles: IndexMap<String, AgentProfile>,
}

impl AgentConfig {
    pub fn profile(&self, name: &str) -> Option<&AgentProfile> {
        self.profiles.get(name)
    }

    /// Sum of all distribution weights. None if it does not fit in a u64.
    pub fn total_agents(&self) -> Option<u64> {
        self.agent_distribution
            .values()
            .try_fold(0u64, |total, weight| total.checked_add(*weight))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub base_config: BaseConfig,

    #[serde(default, deserialize_with = "null_as_default")]
    pub available_actions: Vec<ActionRule>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub action_sequences: Vec<ActionSequence>,
}

impl AgentProfile {
    pub fn get_action_config(&self, action: &str) -> Option<&ActionRule> {
        self.available_actions.iter().find(|r| r.action == action)
    }

    pub fn sequence(&self, name: &str) -> Option<&ActionSequence> {
        self.action_sequences.iter().find(|s| s.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    pub target_account_count: u64,
    pub max_daily_actions: u64,
    pub risk_tolerance: f64,
    pub preferred_networks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_addresses: Option<Vec<Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_accounts_per_day: Option<u64>,
    /// Sequence name to the probability of starting it.
    pub sequence_probabilities: IndexMap<String, f64>,

    /// Settings this crate does not interpret.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            target_account_count: 1,
            max_daily_actions: 10,
            risk_tolerance: 0.5,
            preferred_networks: vec![],
            preset_addresses: None,
            max_accounts_per_day: None,
            sequence_probabilities: IndexMap::new(),
            extra: Mapping::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRule {
    pub action: String,
    pub probability: f64,
    #[serde(default)]
    pub cooldown_blocks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_executions: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub constraints: Mapping,
}

impl ActionRule {
    /// Never fires on its own; may still run inside a sequence.
    pub fn is_inert(&self) -> bool {
        self.probability == 0.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSequence {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_executions: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<ActionStep>,
}

impl ActionSequence {
    /// Steps in execution order, each repeated `repeat` times.
    pub fn expanded_steps(&self) -> impl Iterator<Item = &ActionStep> {
        self.steps.iter().flat_map(|s| {
            std::iter::repeat(s).take(s.repeat_count().unwrap_or(usize::MAX))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionStep {
    pub action: String,
    #[serde(default = "default_repeat")]
    pub repeat: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub constraints: Mapping,
    /// Literal parameter overrides.
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Mapping,
}

impl ActionStep {
    /// None if `repeat` does not fit in a usize on this target.
    pub fn repeat_count(&self) -> Option<usize> {
        usize::try_from(self.repeat).ok()
    }
}
