//! In-memory command table shared by the repository implementations.

use crate::error::StoreError;
use crate::types::{NewUserCommand, UserCommand, UserCommandUpdate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// User commands indexed by owner, then by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandTable {
    users: HashMap<Uuid, BTreeMap<String, UserCommand>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: Uuid, name: &str) -> Result<&UserCommand, StoreError> {
        self.users
            .get(&user_id)
            .and_then(|commands| commands.get(name))
            .ok_or_else(|| not_found(user_id, name))
    }

    /// Commands of one user, ordered by name.
    pub fn list(&self, user_id: Uuid) -> Vec<UserCommand> {
        self.users
            .get(&user_id)
            .map(|commands| commands.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn insert(&mut self, command: NewUserCommand) -> Result<UserCommand, StoreError> {
        let commands = self.users.entry(command.user_id).or_default();
        if commands.contains_key(&command.name) {
            return Err(StoreError::UniqueViolation {
                user_id: command.user_id,
                name: command.name,
            });
        }

        let record = UserCommand::new(command.user_id, command.name, command.text, command.reply);
        commands.insert(record.name.clone(), record.clone());
        Ok(record)
    }

    pub fn update(
        &mut self,
        user_id: Uuid,
        name: &str,
        update: &UserCommandUpdate,
    ) -> Result<UserCommand, StoreError> {
        let commands = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| not_found(user_id, name))?;

        if let Some(new_name) = &update.new_name {
            if new_name != name && commands.contains_key(new_name) {
                return Err(StoreError::UniqueViolation {
                    user_id,
                    name: new_name.clone(),
                });
            }
        }

        let mut record = commands
            .remove(name)
            .ok_or_else(|| not_found(user_id, name))?;
        record.apply(update);
        commands.insert(record.name.clone(), record.clone());
        Ok(record)
    }

    pub fn remove(&mut self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError> {
        let commands = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| not_found(user_id, name))?;
        let removed = commands
            .remove(name)
            .ok_or_else(|| not_found(user_id, name))?;

        if commands.is_empty() {
            self.users.remove(&user_id);
        }
        Ok(removed)
    }

    /// Total number of commands across all users.
    pub fn count(&self) -> usize {
        self.users.values().map(BTreeMap::len).sum()
    }
}

fn not_found(user_id: Uuid, name: &str) -> StoreError {
    StoreError::NotFound {
        user_id,
        name: name.to_string(),
    }
}
