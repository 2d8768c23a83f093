//! User command records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined chat command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCommand {
    /// Internal id of the owning user.
    pub user_id: Uuid,
    /// Trigger, matched verbatim against the first token of a message.
    pub name: String,
    /// Reply text, stored verbatim.
    pub text: String,
    /// Whether the reply is threaded to the triggering message.
    pub reply: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserCommand {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        text: impl Into<String>,
        reply: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            name: name.into(),
            text: text.into(),
            reply,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, bumping `updated_at`.
    pub fn apply(&mut self, update: &UserCommandUpdate) {
        if let Some(name) = &update.new_name {
            self.name = name.clone();
        }
        if let Some(text) = &update.text {
            self.text = text.clone();
        }
        if let Some(reply) = update.reply {
            self.reply = reply;
        }
        self.updated_at = Utc::now();
    }
}

/// Parameters for creating a user command.
#[derive(Debug, Clone)]
pub struct NewUserCommand {
    pub user_id: Uuid,
    pub name: String,
    pub text: String,
    pub reply: bool,
}

/// Partial update of a user command. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserCommandUpdate {
    pub new_name: Option<String>,
    pub text: Option<String>,
    pub reply: Option<bool>,
}

impl UserCommandUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn rename(new_name: impl Into<String>) -> Self {
        Self {
            new_name: Some(new_name.into()),
            ..Default::default()
        }
    }
}
