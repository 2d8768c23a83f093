//! Storage errors for user-defined commands.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User command not found: {user_id}/{name}")]
    NotFound { user_id: Uuid, name: String },

    /// The (user, name) unique constraint was violated.
    #[error("User command already exists: {user_id}/{name}")]
    UniqueViolation { user_id: Uuid, name: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
