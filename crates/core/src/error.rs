use thiserror::Error;

pub type RevPulseResult<T> = Result<T, RevPulseError>;

#[derive(Error, Debug)]
pub enum RevPulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported attribution window: {0} days")]
    InvalidWindow(u32),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
