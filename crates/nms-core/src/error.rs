use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The orchestrator answered with a non-success status.
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Write task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl Error {
    /// Text for a transient notification: the structured response message
    /// when the orchestrator sent one, the error display otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
