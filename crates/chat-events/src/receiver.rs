//! Newline-delimited JSON event receiver.

use crate::types::ChatMessage;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::Stream;
use tracing::{debug, error, warn};

/// Receiver that turns a line-oriented reader into a stream of chat events.
///
/// Each line carries one JSON-encoded [`ChatMessage`]. Blank lines are
/// skipped and malformed lines are dropped with a warning so a single bad
/// producer cannot stall the stream.
pub struct EventReceiver<R> {
    reader: R,
}

impl<R> EventReceiver<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    /// Create a new receiver over `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Start receiving events as an async stream. Ends when the reader does.
    pub fn stream(self) -> impl Stream<Item = ChatMessage> {
        async_stream::stream! {
            let mut lines = self.reader.lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match ChatMessage::from_json(&line) {
                            Ok(event) => {
                                debug!(
                                    platform = %event.platform,
                                    broadcaster_id = %event.broadcaster_id,
                                    message_id = %event.message_id,
                                    "Received chat message"
                                );
                                yield event;
                            }
                            Err(e) => {
                                warn!(error = %e, "Dropping malformed event");
                            }
                        }
                    }
                    Ok(None) => {
                        debug!("Event source closed");
                        break;
                    }
                    Err(e) => {
                        error!("Receive error: {}", e);
                        break;
                    }
                }
            }
        }
    }
}
