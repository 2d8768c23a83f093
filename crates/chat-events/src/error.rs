//! Event transport errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Publish failed: {0}")]
    PublishFailed(String),
}
