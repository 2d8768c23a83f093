//! Chat event types shared with the message bus.

use crate::error::EventError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Streaming platform an event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitch,
    Kick,
    Youtube,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitch => "twitch",
            Platform::Kick => "kick",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a chatter inside a channel, ordered by privilege.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatterRole {
    #[default]
    Viewer,
    Subscriber,
    Vip,
    Moderator,
    Broadcaster,
}

/// Normalized inbound chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub platform: Platform,
    #[serde(rename = "broadcasterID")]
    pub broadcaster_id: String,
    #[serde(rename = "broadcasterName", default)]
    pub broadcaster_name: String,
    #[serde(rename = "broadcasterLogin", default)]
    pub broadcaster_login: String,
    #[serde(rename = "chatterID")]
    pub chatter_id: String,
    #[serde(rename = "chatterName", default)]
    pub chatter_name: String,
    #[serde(rename = "chatterLogin", default)]
    pub chatter_login: String,
    #[serde(rename = "chatterRole", default)]
    pub chatter_role: ChatterRole,
    #[serde(rename = "botID")]
    pub bot_id: String,
    /// Internal id of the channel owner; partitions user-defined commands.
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    #[serde(rename = "messageID")]
    pub message_id: String,
    pub message: String,
    #[serde(rename = "replyTo", default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl ChatMessage {
    /// Decode a single JSON-encoded event.
    pub fn from_json(raw: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Outbound reply produced by the command core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSend {
    #[serde(rename = "broadcasterID")]
    pub broadcaster_id: String,
    #[serde(rename = "botID")]
    pub bot_id: String,
    pub platform: Platform,
    pub message: String,
    #[serde(rename = "replyTo", default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}
