use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheepifyError {
    #[error("not initialized: run 'sheepify init'")]
    NotInitialized,

    #[error("a sleep session is already in progress (started {0})")]
    SessionActive(String),

    #[error("no sleep session in progress")]
    NoActiveSession,

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("sheep not found: {0}")]
    SheepNotFound(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("wake time {wake} is not after bed time {bed}")]
    WakeBeforeBed { bed: String, wake: String },

    #[error("insufficient wool: has {has}, needs {needs}")]
    InsufficientWool { has: u64, needs: u64 },

    #[error("invalid name '{0}': must be 1-50 characters, no control characters")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SheepifyError>;
