//! Persistent storage for user-defined chat commands.
//!
//! The command core consumes storage through [`UserCommandRepository`].
//! [`MemoryRepository`] keeps everything in process memory,
//! [`FileRepository`] additionally persists a JSON snapshot.

mod error;
mod file;
mod memory;
mod repository;
mod table;
mod types;

pub use error::StoreError;
pub use file::FileRepository;
pub use memory::MemoryRepository;
pub use repository::UserCommandRepository;
pub use table::CommandTable;
pub use types::*;
