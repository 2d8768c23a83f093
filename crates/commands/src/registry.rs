//! Registry of built-in commands.

use crate::types::Command;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maps command names and aliases to built-in commands.
///
/// Filled once at startup through `&mut self`, then shared read-only.
pub struct CommandRegistry {
    prefix: String,
    names: HashMap<String, Arc<dyn Command>>,
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            names: HashMap::new(),
            commands: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register a command under its name and aliases.
    ///
    /// Names already taken keep their existing command. Returns the number of
    /// names that were added.
    pub fn register(&mut self, command: Arc<dyn Command>) -> usize {
        let names = std::iter::once(command.name()).chain(command.aliases().iter().copied());

        let mut added = 0;
        for name in names {
            if self.names.contains_key(name) {
                warn!(
                    cmd = %command.name(),
                    name = %name,
                    "Attempt at setting already existing command"
                );
                continue;
            }
            self.names.insert(name.to_string(), command.clone());
            added += 1;
        }

        if added > 0 {
            debug!(cmd = %command.name(), names = added, "Registered command");
            self.commands.push(command);
        }
        added
    }

    /// Look up a command by name or alias, without prefix.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.names.get(name).cloned()
    }

    /// Whether `name` is a registered name or alias.
    pub fn is_known_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Whether `name` would shadow a built-in, with or without the prefix.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.is_known_name(name)
            || name
                .strip_prefix(self.prefix.as_str())
                .is_some_and(|bare| self.is_known_name(bare))
    }

    /// Whether a chat message invokes a built-in command.
    pub fn is_command(&self, text: &str) -> bool {
        let Some(rest) = text.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let name = rest.split(char::is_whitespace).next().unwrap_or_default();
        self.is_known_name(name)
    }

    /// Distinct commands in registration order.
    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(crate::types::COMMAND_PREFIX)
    }
}
