//! Cache errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A live entry already exists under the key (create-if-absent lost).
    #[error("Key already exists: {0}")]
    KeyExists(String),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}
