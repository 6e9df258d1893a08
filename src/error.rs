use thiserror::Error;

/// Errors that can occur while mirroring a repository
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("remote returned status {status} for {path}")]
    RemoteStatus { status: u16, path: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed metadata response: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid inline payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("concurrency limiter closed")]
    Limiter(#[from] tokio::sync::AcquireError),

    #[error("background write failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;
