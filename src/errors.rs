use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Usage service returned HTTP {0}")]
    UpstreamStatus(u16),

    /// Envelope came back with `success: false`; carries the service message.
    #[error("{0}")]
    Rejected(String),

    #[error("Unsupported limit {0}, expected one of 10, 20, 30")]
    InvalidLimit(u32),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message handed to the notifier when a fetch attempt fails.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Transport(e) if e.is_timeout() => "Request timed out".to_string(),
            AppError::Transport(e) if e.is_connect() => {
                "Unable to reach the usage service".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
