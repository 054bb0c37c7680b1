use std::{collections::BTreeMap, fmt};

use libcircles_codegen::{generator::ContractGenerator, synth::GeneratedUnit};
use libcircles_core::strategy::Strategy;
use libcircles_utils::log::{debug, warn};

use crate::descriptor::AgentConfig;

#[derive(Clone, Debug)]
pub struct RegisteredAction {
    pub contract: String,
    pub unit: GeneratedUnit,
}

/// Generated strategies keyed by action identifier, e.g. `wxdai_Deposit`.
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, RegisteredAction>,
}

/// An action referenced by a profile that no strategy was generated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryIssue {
    pub profile: String,
    pub location: String,
    pub action: String,
}

impl fmt::Display for RegistryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "profile `{}`, {}: unknown action `{}`",
            self.profile, self.location, self.action
        )
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_units(&mut self, contract: &str, units: &[GeneratedUnit]) {
        for unit in units {
            let id = unit.action_id(contract);
            debug!(action = id.as_str(), strategy = unit.name.as_str(), "register action");
            let previous = self.actions.insert(
                id.clone(),
                RegisteredAction {
                    contract: contract.to_string(),
                    unit: unit.clone(),
                },
            );
            if let Some(previous) = previous {
                warn!(
                    action = id.as_str(),
                    replaced = previous.unit.name.as_str(),
                    "action registered twice, keeping the latest"
                );
            }
        }
    }

    pub fn register_generator(&mut self, generator: &ContractGenerator) {
        self.register_units(&generator.contract_name, &generator.units());
    }

    pub fn get(&self, action: &str) -> Option<&RegisteredAction> {
        self.actions.get(action)
    }

    pub fn strategy(&self, action: &str) -> Option<&dyn Strategy> {
        self.actions.get(action).map(|a| &a.unit as &dyn Strategy)
    }

    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    /// Sorted.
    pub fn action_ids(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Lists every action referenced by `config` that is not registered.
    pub fn check(&self, config: &AgentConfig) -> Vec<RegistryIssue> {
        let mut issues = vec![];
        for (name, profile) in &config.profiles {
            let mut report = |location: String, action: &str| {
                if !self.contains(action) {
                    issues.push(RegistryIssue {
                        profile: name.clone(),
                        location,
                        action: action.to_string(),
                    });
                }
            };
            for (i, rule) in profile.available_actions.iter().enumerate() {
                report(format!("available_actions[{}]", i), &rule.action);
            }
            for (i, seq) in profile.action_sequences.iter().enumerate() {
                for (j, step) in seq.steps.iter().enumerate() {
                    report(
                        format!("action_sequences[{}].steps[{}]", i, j),
                        &step.action,
                    );
                }
            }
        }
        issues
    }
}
