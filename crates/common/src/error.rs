use thiserror::Error;

/// Error kinds produced while polling the review API and relaying statuses.
///
/// Everything except [`AppError::Config`] is recoverable: the watcher loop logs
/// it, reports it to the chat and tries again on the next cycle.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API responded with status {0}")]
    ApiStatus(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Messenger error: {0}")]
    Messenger(String),
}

impl AppError {
    /// Shorthand for a [`AppError::Shape`] with a static description.
    pub fn shape(what: &str) -> Self {
        AppError::Shape(what.to_string())
    }
}
