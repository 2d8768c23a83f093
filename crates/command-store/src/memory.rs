//! In-memory repository implementation.

use crate::error::StoreError;
use crate::repository::UserCommandRepository;
use crate::table::CommandTable;
use crate::types::{NewUserCommand, UserCommand, UserCommandUpdate};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Volatile repository, contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    table: RwLock<CommandTable>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.count()
    }
}

#[async_trait]
impl UserCommandRepository for MemoryRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError> {
        self.table.read().await.get(user_id, name).cloned()
    }

    #[instrument(skip(self))]
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<UserCommand>, StoreError> {
        Ok(self.table.read().await.list(user_id))
    }

    #[instrument(skip(self, command), fields(user_id = %command.user_id, name = %command.name))]
    async fn create(&self, command: NewUserCommand) -> Result<UserCommand, StoreError> {
        let record = self.table.write().await.insert(command)?;
        debug!("Created user command");
        Ok(record)
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        user_id: Uuid,
        name: &str,
        update: UserCommandUpdate,
    ) -> Result<UserCommand, StoreError> {
        self.table.write().await.update(user_id, name, &update)
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError> {
        self.table.write().await.remove(user_id, name)
    }
}
