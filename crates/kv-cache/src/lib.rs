//! TTL key-value cache.
//!
//! The command core only relies on the [`KeyValueCache`] contract
//! (create-if-absent with TTL, get, put, delete). [`MemoryCache`] is the
//! process-local implementation used by the bot and by tests.

mod cache;
mod error;
mod memory;

pub use cache::KeyValueCache;
pub use error::CacheError;
pub use memory::MemoryCache;
