use crate::validate::ValidationError;

#[derive(Debug, derive_more::Display, thiserror::Error)]
pub enum AgentConfigError {
    #[display(fmt = "Err reading agent config: {}", _0)]
    Io(std::io::Error),

    #[display(fmt = "Err parsing agent config: {}", _0)]
    Parse(serde_yaml::Error),

    #[display(fmt = "Err invalid agent config: {}", _0)]
    Invalid(ValidationError),
}

impl From<std::io::Error> for AgentConfigError {
    fn from(e: std::io::Error) -> Self {
        AgentConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for AgentConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        AgentConfigError::Parse(e)
    }
}

impl From<ValidationError> for AgentConfigError {
    fn from(e: ValidationError) -> Self {
        AgentConfigError::Invalid(e)
    }
}
