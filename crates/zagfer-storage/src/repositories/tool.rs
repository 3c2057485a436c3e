#![allow(async_fn_in_trait)]

use crate::error::{StorageError, StorageResult};
use crate::models::{Tool, ToolStatus};
use sqlx::SqlitePool;

/// Repository trait for Tool entity operations
///
/// This trait defines the contract for tool catalog data access, enabling
/// testability through mock implementations and separation of concerns.
///
/// # Implementation Note
///
/// This trait uses native async trait methods (Edition 2024 feature),
/// eliminating the need for the async-trait crate.
pub trait ToolRepository: Send + Sync {
    /// Get all tools, ordered by name
    async fn find_all(&self) -> StorageResult<Vec<Tool>>;

    /// Find a tool by its id
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Tool>>;

    /// Get all tools currently in the given status
    async fn find_by_status(&self, status: ToolStatus) -> StorageResult<Vec<Tool>>;

    /// Create a new tool
    async fn create(&self, tool: &Tool) -> StorageResult<()>;

    /// Update an existing tool (all fields, status included)
    async fn update(&self, tool: &Tool) -> StorageResult<()>;

    /// Delete a tool by id. History referencing the id is left untouched.
    async fn delete(&self, id: &str) -> StorageResult<()>;

    /// Set the status of several tools at once
    async fn set_status(&self, ids: &[String], status: ToolStatus) -> StorageResult<()>;
}

/// SQLite implementation of ToolRepository
#[derive(Clone)]
pub struct SqliteToolRepository {
    pool: SqlitePool,
}

impl SqliteToolRepository {
    /// Create a new SQLite tool repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ToolRepository for SqliteToolRepository {
    async fn find_all(&self) -> StorageResult<Vec<Tool>> {
        let tools = sqlx::query_as::<_, Tool>(
            r#"
            SELECT id, name, category, size, bmp, sector, status,
                   created_at, updated_at
            FROM tools
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tools)
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Tool>> {
        let tool = sqlx::query_as::<_, Tool>(
            r#"
            SELECT id, name, category, size, bmp, sector, status,
                   created_at, updated_at
            FROM tools
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tool)
    }

    async fn find_by_status(&self, status: ToolStatus) -> StorageResult<Vec<Tool>> {
        let tools = sqlx::query_as::<_, Tool>(
            r#"
            SELECT id, name, category, size, bmp, sector, status,
                   created_at, updated_at
            FROM tools
            WHERE status = ?
            ORDER BY name
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(tools)
    }

    async fn create(&self, tool: &Tool) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tools (id, name, category, size, bmp, sector, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tool.id)
        .bind(&tool.name)
        .bind(&tool.category)
        .bind(&tool.size)
        .bind(&tool.bmp)
        .bind(&tool.sector)
        .bind(tool.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, tool: &Tool) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tools
            SET name = ?, category = ?, size = ?, bmp = ?, sector = ?,
                status = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&tool.name)
        .bind(&tool.category)
        .bind(&tool.size)
        .bind(&tool.bmp)
        .bind(&tool.sector)
        .bind(tool.status)
        .bind(&tool.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity_type: "Tool".to_string(),
                field: "id".to_string(),
                value: tool.id.clone(),
            });
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM tools WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity_type: "Tool".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            });
        }

        Ok(())
    }

    async fn set_status(&self, ids: &[String], status: ToolStatus) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;
        crate::transaction::set_tools_status(&mut tx, ids, status).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Database;

    async fn setup_test_db() -> Database {
        Database::in_memory().await.unwrap()
    }

    fn create_test_tool(id: &str, name: &str) -> Tool {
        let mut tool = Tool::new(id, name, "Manual", "Manutenção A");
        tool.size = Some("1/4\"".to_string());
        tool
    }

    #[tokio::test]
    async fn test_create_and_find_tool() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());

        let tool = create_test_tool("1", "Chave de Fenda");
        repo.create(&tool).await.unwrap();

        let found = repo.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(found.name, "Chave de Fenda");
        assert_eq!(found.status, ToolStatus::Available);
        assert_eq!(found.size.as_deref(), Some("1/4\""));
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_name() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());

        repo.create(&create_test_tool("1", "Multímetro")).await.unwrap();
        repo.create(&create_test_tool("2", "Alicate Universal"))
            .await
            .unwrap();

        let tools = repo.find_all().await.unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "Alicate Universal");
    }

    #[tokio::test]
    async fn test_set_status_many() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());

        repo.create(&create_test_tool("1", "Chave de Fenda")).await.unwrap();
        repo.create(&create_test_tool("2", "Martelete")).await.unwrap();
        repo.create(&create_test_tool("3", "Paquímetro")).await.unwrap();

        repo.set_status(&["1".to_string(), "3".to_string()], ToolStatus::Unavailable)
            .await
            .unwrap();

        let unavailable = repo.find_by_status(ToolStatus::Unavailable).await.unwrap();
        let ids: Vec<&str> = unavailable.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_update_tool() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());

        let mut tool = create_test_tool("1", "Chave de Fenda");
        repo.create(&tool).await.unwrap();

        tool.sector = "Usinagem".to_string();
        repo.update(&tool).await.unwrap();

        let found = repo.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(found.sector, "Usinagem");
    }

    #[tokio::test]
    async fn test_update_missing_tool_is_not_found() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());

        let tool = create_test_tool("999", "Fantasma");
        let result = repo.update(&tool).await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_tool() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());

        repo.create(&create_test_tool("1", "Chave de Fenda")).await.unwrap();
        repo.delete("1").await.unwrap();

        assert!(repo.find_by_id("1").await.unwrap().is_none());
        assert!(matches!(
            repo.delete("1").await,
            Err(StorageError::NotFound { .. })
        ));
    }
}
