//! Outbound reply publishers.

use crate::error::EventError;
use crate::types::MessageSend;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, instrument};

/// Sink for replies produced by the command core.
#[async_trait]
pub trait ReplyPublisher: Send + Sync {
    /// Publish a reply event.
    async fn publish(&self, reply: &MessageSend) -> Result<(), EventError>;
}

/// Publisher writing one JSON document per line.
pub struct JsonLinesPublisher<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the publisher and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> ReplyPublisher for JsonLinesPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    #[instrument(skip(self, reply), fields(broadcaster_id = %reply.broadcaster_id))]
    async fn publish(&self, reply: &MessageSend) -> Result<(), EventError> {
        let mut line = serde_json::to_vec(reply)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;

        debug!("Published reply ({} bytes)", line.len());
        Ok(())
    }
}

/// Publisher forwarding replies into an in-process channel.
#[derive(Clone)]
pub struct ChannelPublisher {
    tx: mpsc::UnboundedSender<MessageSend>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiving half of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MessageSend>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ReplyPublisher for ChannelPublisher {
    async fn publish(&self, reply: &MessageSend) -> Result<(), EventError> {
        self.tx
            .send(reply.clone())
            .map_err(|_| EventError::PublishFailed("reply channel closed".into()))
    }
}
