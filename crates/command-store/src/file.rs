//! Repository persisted as a JSON snapshot on disk.

use crate::error::StoreError;
use crate::repository::UserCommandRepository;
use crate::table::CommandTable;
use crate::types::{NewUserCommand, UserCommand, UserCommandUpdate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Snapshot schema version for migrations.
const DATA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    table: CommandTable,
}

/// File-backed repository.
///
/// Every mutation is applied to a copy of the table, written to disk with a
/// temp-file rename, and only then made visible. A failed write leaves both
/// the file and the in-memory view unchanged.
pub struct FileRepository {
    table: RwLock<CommandTable>,
    storage_path: PathBuf,
}

impl FileRepository {
    /// Open the repository, loading an existing snapshot if present.
    pub async fn open(storage_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let storage_path = storage_path.into();
        let table = load(&storage_path).await?;

        info!(
            "Loaded {} user commands from {:?}",
            table.count(),
            storage_path
        );

        Ok(Self {
            table: RwLock::new(table),
            storage_path,
        })
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Write the current table to disk.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let table = self.table.read().await;
        save(&self.storage_path, &table).await
    }

    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut CommandTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut table = self.table.write().await;
        let mut next = table.clone();
        let result = op(&mut next)?;
        save(&self.storage_path, &next).await?;
        *table = next;
        Ok(result)
    }
}

async fn load(path: &Path) -> Result<CommandTable, StoreError> {
    let data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No command snapshot at {:?}, starting empty", path);
            return Ok(CommandTable::new());
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot: Snapshot = serde_json::from_slice(&data)?;
    if snapshot.version != DATA_VERSION {
        warn!(
            "Command snapshot version {} differs from {}",
            snapshot.version, DATA_VERSION
        );
    }
    Ok(snapshot.table)
}

async fn save(path: &Path, table: &CommandTable) -> Result<(), StoreError> {
    let snapshot = Snapshot {
        version: DATA_VERSION,
        table: table.clone(),
    };
    let data = serde_json::to_vec(&snapshot)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Atomic write
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, &data).await?;
    fs::rename(&temp_path, path).await?;

    debug!("Saved command snapshot ({} bytes) to {:?}", data.len(), path);
    Ok(())
}

#[async_trait]
impl UserCommandRepository for FileRepository {
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
        self.mutate(|table| table.insert(command)).await
    }

    #[instrument(skip(self, update))]
    async fn update(
        &self,
        user_id: Uuid,
        name: &str,
        update: UserCommandUpdate,
    ) -> Result<UserCommand, StoreError> {
        self.mutate(|table| table.update(user_id, name, &update)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Uuid, name: &str) -> Result<UserCommand, StoreError> {
        self.mutate(|table| table.remove(user_id, name)).await
    }
}
