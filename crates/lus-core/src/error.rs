use thiserror::Error;

#[derive(Error, Debug)]
pub enum LusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The registry dispatch loop received a request kind it does not know
    /// how to handle. Never constructed by a correctly wired transport;
    /// documents the "programmer error" failure mode from the engine's
    /// dispatch table rather than a condition callers should expect.
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LusError>;
