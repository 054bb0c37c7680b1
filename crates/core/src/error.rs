pub type Result<T, E = CirclesError> = std::result::Result<T, E>;

#[derive(Debug, derive_more::Display, thiserror::Error)]
pub enum CirclesError {
    #[display(fmt = "Err invalid config: {}", _0)]
    Config(String),

    #[display(fmt = "Err invalid abi: {}", _0)]
    Abi(String),

    #[display(fmt = "Err io: {}", _0)]
    Io(std::io::Error),
}

impl From<std::io::Error> for CirclesError {
    fn from(e: std::io::Error) -> Self {
        CirclesError::Io(e)
    }
}

impl From<serde_json::Error> for CirclesError {
    fn from(e: serde_json::Error) -> Self {
        CirclesError::Abi(e.to_string())
    }
}
