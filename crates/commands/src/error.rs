//! Command dispatch errors.

use command_store::StoreError;
use thiserror::Error;

/// Errors that can occur while resolving or executing a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Command or user command lookup missed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Name collision, malformed arguments or out-of-range values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Cooldown active or insufficient role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The command ran and decided that no reply is warranted.
    #[error("No action")]
    NoAction,

    /// Cache or store backend failure.
    #[error("External service error: {0}")]
    External(String),

    /// Programming invariant violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    /// Whether the error ends dispatch silently, without any reply.
    pub fn is_silent(&self) -> bool {
        matches!(self, CommandError::NoAction | CommandError::Forbidden(_))
    }
}

/// Single mapping step from storage failures to the command taxonomy.
///
/// Backend details stay in the logs; the messages produced here are safe to
/// show in chat.
impl From<StoreError> for CommandError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => CommandError::NotFound("command not found".into()),
            StoreError::UniqueViolation { .. } => {
                CommandError::InvalidInput("command already exists".into())
            }
            StoreError::Unavailable(_) => {
                CommandError::External("command storage unavailable".into())
            }
            StoreError::Io(_) | StoreError::Serialization(_) => {
                CommandError::Internal("command storage failure".into())
            }
        }
    }
}
