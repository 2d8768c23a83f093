//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Command store error: {0}")]
    Store(#[from] command_store::StoreError),

    #[error("Event transport error: {0}")]
    Events(#[from] chat_events::EventError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
