//! Repository contract for user commands.

use crate::error::StoreError;
use crate::types::{NewUserCommand, UserCommand, UserCommandUpdate};
use async_trait::async_trait;
use uuid::Uuid;

/// CRUD access to user commands keyed by (user, name).
#[async_trait]
pub trait UserCommandRepository: Send + Sync {
    async fn get_one(&self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError>;

    /// All commands owned by `user_id`, ordered by name.
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<UserCommand>, StoreError>;

    async fn create(&self, command: NewUserCommand) -> Result<UserCommand, StoreError>;

    async fn update(
        &self,
        user_id: Uuid,
        name: &str,
        update: UserCommandUpdate,
    ) -> Result<UserCommand, StoreError>;

    /// Delete and return the removed command.
    async fn delete(&self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError>;
}
