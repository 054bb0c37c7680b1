use std::collections::HashSet;

use crate::descriptor::{
    ActionRule, ActionSequence, AgentConfig, AgentProfile,
};

/// The first problem found in an agent behavior document.
///
/// `location` reads like `available_actions[1] (batchcall_BatchCall)`.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, thiserror::Error)]
pub enum ValidationError {
    #[display(fmt = "profile `{}`, {}: {}", profile, location, reason)]
    Profile {
        profile: String,
        location: String,
        reason: String,
    },

    /// Outside any profile.
    #[display(fmt = "{}: {}", location, reason)]
    Document { location: String, reason: String },
}

impl ValidationError {
    fn new(
        profile: Option<&str>,
        location: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let location = location.into();
        let reason = reason.into();
        match profile {
            Some(profile) => ValidationError::Profile {
                profile: profile.to_string(),
                location,
                reason,
            },
            None => ValidationError::Document { location, reason },
        }
    }

    pub fn profile(&self) -> Option<&str> {
        match self {
            ValidationError::Profile { profile, .. } => Some(profile),
            ValidationError::Document { .. } => None,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            ValidationError::Profile { location, .. }
            | ValidationError::Document { location, .. } => location,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            ValidationError::Profile { reason, .. }
            | ValidationError::Document { reason, .. } => reason,
        }
    }
}

fn check_probability(
    profile: &str,
    location: &str,
    p: f64,
) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ValidationError::new(
            Some(profile),
            location,
            format!("probability {} is outside [0, 1]", p),
        ));
    }
    Ok(())
}

fn validate_rule(
    profile: &str,
    index: usize,
    rule: &ActionRule,
) -> Result<(), ValidationError> {
    let location = format!("available_actions[{}] ({})", index, rule.action);
    if rule.action.is_empty() {
        return Err(ValidationError::new(
            Some(profile),
            location,
            "empty action identifier",
        ));
    }
    check_probability(profile, &location, rule.probability)
}

fn validate_sequence(
    profile: &str,
    index: usize,
    sequence: &ActionSequence,
) -> Result<(), ValidationError> {
    let location = format!("action_sequences[{}] ({})", index, sequence.name);
    if sequence.name.is_empty() {
        return Err(ValidationError::new(
            Some(profile),
            location,
            "empty sequence name",
        ));
    }
    if sequence.steps.is_empty() {
        return Err(ValidationError::new(
            Some(profile),
            location,
            "sequence has no steps",
        ));
    }
    for (i, step) in sequence.steps.iter().enumerate() {
        let location = format!("{}.steps[{}] ({})", location, i, step.action);
        if step.action.is_empty() {
            return Err(ValidationError::new(
                Some(profile),
                location,
                "empty action identifier",
            ));
        }
        if step.repeat < 1 {
            return Err(ValidationError::new(
                Some(profile),
                location,
                "repeat must be at least 1",
            ));
        }
        if step.repeat_count().is_none() {
            return Err(ValidationError::new(
                Some(profile),
                location,
                format!("repeat {} is too large", step.repeat),
            ));
        }
    }
    Ok(())
}

fn validate_profile(
    name: &str,
    profile: &AgentProfile,
) -> Result<(), ValidationError> {
    let mut actions = HashSet::new();
    for (i, rule) in profile.available_actions.iter().enumerate() {
        validate_rule(name, i, rule)?;
        if !actions.insert(rule.action.as_str()) {
            return Err(ValidationError::new(
                Some(name),
                format!("available_actions[{}] ({})", i, rule.action),
                "action listed more than once",
            ));
        }
    }

    let mut sequences = HashSet::new();
    for (i, sequence) in profile.action_sequences.iter().enumerate() {
        validate_sequence(name, i, sequence)?;
        if !sequences.insert(sequence.name.as_str()) {
            return Err(ValidationError::new(
                Some(name),
                format!("action_sequences[{}] ({})", i, sequence.name),
                "sequence declared more than once",
            ));
        }
    }

    for (sequence, p) in &profile.base_config.sequence_probabilities {
        let location =
            format!("base_config.sequence_probabilities.{}", sequence);
        check_probability(name, &location, *p)?;
        if !sequences.contains(sequence.as_str()) {
            return Err(ValidationError::new(
                Some(name),
                location,
                "no such action sequence",
            ));
        }
    }
    Ok(())
}

impl AgentConfig {
    /// Checks the whole document and reports the first violation.
    ///
    /// Negative counts never get here: `cooldown_blocks`,
    /// `max_executions`, `max_accounts_per_day` and distribution weights
    /// are unsigned and rejected while parsing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for name in self.agent_distribution.keys() {
            if !self.profiles.contains_key(name) {
                return Err(ValidationError::new(
                    None,
                    format!("agent_distribution.{}", name),
                    "no such profile",
                ));
            }
        }
        if self.total_agents().is_none() {
            return Err(ValidationError::new(
                None,
                "agent_distribution",
                "total weight overflows",
            ));
        }
        for (name, profile) in &self.profiles {
            validate_profile(name, profile)?;
        }
        Ok(())
    }
}
