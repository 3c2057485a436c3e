use crate::error::{StorageError, StorageResult};
use crate::models::{HistoryRecord, Tool, ToolStatus, User};
use crate::repositories::{
    HistoryRepository, SqliteHistoryRepository, SqliteToolRepository, SqliteUserRepository,
    ToolRepository, UserRepository,
};
use crate::store::EntityStore;
use crate::transaction;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use zagfer_core::Result;

/// SQLite-backed entity store.
///
/// Composes the per-entity repositories over a shared pool. Loan
/// mutations run inside a single SQLite transaction, so
/// `supports_atomic_apply` is always true here.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    tools: SqliteToolRepository,
    users: SqliteUserRepository,
    history: SqliteHistoryRepository,
}

impl SqliteStore {
    /// Create a new store over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            tools: SqliteToolRepository::new(pool.clone()),
            users: SqliteUserRepository::new(pool.clone()),
            history: SqliteHistoryRepository::new(pool.clone()),
            pool,
        }
    }

    async fn refetch_tool(&self, id: &str) -> StorageResult<Tool> {
        self.tools
            .find_by_id(id)
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity_type: "Tool".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    async fn refetch_user(&self, id: &str) -> StorageResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| StorageError::NotFound {
                entity_type: "User".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }
}

impl EntityStore for SqliteStore {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        Ok(self.tools.find_all().await?)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    async fn list_history(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self.history.find_all().await?)
    }

    async fn find_user_by_matricula(&self, matricula: &str) -> Result<Option<User>> {
        Ok(self.users.find_by_matricula(matricula).await?)
    }

    async fn create_tool(&self, tool: &Tool) -> Result<Tool> {
        self.tools.create(tool).await?;
        Ok(self.refetch_tool(&tool.id).await?)
    }

    async fn update_tool(&self, tool: &Tool) -> Result<Tool> {
        self.tools.update(tool).await?;
        Ok(self.refetch_tool(&tool.id).await?)
    }

    async fn delete_tool(&self, id: &str) -> Result<()> {
        Ok(self.tools.delete(id).await?)
    }

    async fn set_tools_status(&self, ids: &[String], status: ToolStatus) -> Result<()> {
        Ok(self.tools.set_status(ids, status).await?)
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        self.users.create(user).await?;
        Ok(self.refetch_user(&user.id).await?)
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        self.users.update(user).await?;
        Ok(self.refetch_user(&user.id).await?)
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        Ok(self.users.delete(id).await?)
    }

    async fn append_history(&self, record: &HistoryRecord) -> Result<HistoryRecord> {
        self.history.append(record).await?;
        Ok(record.clone())
    }

    async fn update_history_deadline(&self, id: &str, deadline: DateTime<Utc>) -> Result<()> {
        Ok(self.history.update_deadline(id, deadline).await?)
    }

    fn supports_atomic_apply(&self) -> bool {
        true
    }

    async fn apply_loan_mutation(
        &self,
        ids: &[String],
        status: ToolStatus,
        record: &HistoryRecord,
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StorageError::Database)?;

        transaction::set_tools_status(&mut tx, ids, status).await?;
        transaction::append_history(&mut tx, record).await?;

        tx.commit().await.map_err(StorageError::Database)?;
        Ok(())
    }
}
