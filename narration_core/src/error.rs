use thiserror::Error;

/// Errors raised by the narrator.
///
/// None of these reach the person chatting with the agent; the query resolver
/// turns them into scripted replies.
#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NarrationError>;
