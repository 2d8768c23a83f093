//! Chat message events exchanged with the message bus.

mod error;
mod publisher;
mod receiver;
mod types;

pub use error::EventError;
pub use publisher::{ChannelPublisher, JsonLinesPublisher, ReplyPublisher};
pub use receiver::EventReceiver;
pub use types::*;
