//! Transaction-aware write operations.
//!
//! These functions accept a SQLite transaction reference so that the
//! coupled mutations of a loan operation (tool status change + history
//! append) can be grouped into a single atomic transaction. Without the
//! grouping a crash between the two writes could leave a tool marked
//! unavailable with no matching checkout record.
//!
//! # Usage Pattern
//!
//! ```no_run
//! use zagfer_storage::{Database, DatabaseConfig, transaction};
//! use zagfer_storage::models::{ActionType, HistoryRecord, ToolStatus};
//! use chrono::{Duration, Utc};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("zagfer.db")).await?;
//!
//! let record = HistoryRecord::new(
//!     "rec-1",
//!     Utc::now(),
//!     ActionType::Checkout,
//!     "1", "Gerente", "459524",
//!     "3S EDIMAR", "123456",
//!     vec!["1".to_string()],
//!     "Chave de Fenda",
//!     Some(Utc::now() + Duration::hours(24)),
//! );
//!
//! let mut tx = db.pool().begin().await?;
//! transaction::set_tools_status(&mut tx, &record.tool_ids, ToolStatus::Unavailable).await?;
//! transaction::append_history(&mut tx, &record).await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{StorageError, StorageResult};
use crate::models::{HistoryRecord, ToolStatus};
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};

/// Set the status of several tools within a transaction.
///
/// # Errors
///
/// Returns `StorageError::NotFound` if any id does not exist; the caller
/// is expected to roll back.
pub async fn set_tools_status(
    tx: &mut Transaction<'_, Sqlite>,
    ids: &[String],
    status: ToolStatus,
) -> StorageResult<()> {
    for id in ids {
        let result = sqlx::query(
            r#"
            UPDATE tools
            SET status = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity_type: "Tool".to_string(),
                field: "id".to_string(),
                value: id.clone(),
            });
        }
    }

    Ok(())
}

/// Append a history record within a transaction.
///
/// `tool_ids` is serialized to a JSON array for the TEXT column.
pub async fn append_history(
    tx: &mut Transaction<'_, Sqlite>,
    record: &HistoryRecord,
) -> StorageResult<()> {
    let tool_ids = serde_json::to_string(&record.tool_ids)
        .map_err(|e| StorageError::Validation(format!("tool_ids not serializable: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO history (
            id, timestamp, action_type,
            dispatcher_id, dispatcher_name, dispatcher_matricula,
            responsible_name, responsible_matricula,
            tool_ids, tools_summary, expected_return_date
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(record.timestamp)
    .bind(record.action_type)
    .bind(&record.dispatcher_id)
    .bind(&record.dispatcher_name)
    .bind(&record.dispatcher_matricula)
    .bind(&record.responsible_name)
    .bind(&record.responsible_matricula)
    .bind(&tool_ids)
    .bind(&record.tools_summary)
    .bind(record.expected_return_date)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Update a record's expected return date within a transaction.
pub async fn update_history_deadline(
    tx: &mut Transaction<'_, Sqlite>,
    id: &str,
    deadline: DateTime<Utc>,
) -> StorageResult<()> {
    let result = sqlx::query("UPDATE history SET expected_return_date = ? WHERE id = ?")
        .bind(deadline)
        .bind(id)
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound {
            entity_type: "HistoryRecord".to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Database;
    use crate::models::{ActionType, Tool};
    use crate::repositories::{SqliteToolRepository, ToolRepository};
    use chrono::Duration;

    async fn setup_test_db() -> Database {
        Database::in_memory().await.unwrap()
    }

    fn checkout_record(tool_ids: Vec<String>) -> HistoryRecord {
        HistoryRecord::new(
            "rec-1",
            Utc::now(),
            ActionType::Checkout,
            "1",
            "Gerente",
            "459524",
            "3S EDIMAR",
            "123456",
            tool_ids,
            "Chave de Fenda",
            Some(Utc::now() + Duration::hours(24)),
        )
    }

    #[tokio::test]
    async fn test_coupled_mutation_commits_together() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());
        repo.create(&Tool::new("1", "Chave de Fenda", "Manual", "Manutenção A"))
            .await
            .unwrap();

        let record = checkout_record(vec!["1".to_string()]);

        let mut tx = db.pool().begin().await.unwrap();
        set_tools_status(&mut tx, &record.tool_ids, ToolStatus::Unavailable)
            .await
            .unwrap();
        append_history(&mut tx, &record).await.unwrap();
        tx.commit().await.unwrap();

        let tool = repo.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(tool.status, ToolStatus::Unavailable);

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM history")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_rollback_undoes_status_change() {
        let db = setup_test_db().await;
        let repo = SqliteToolRepository::new(db.pool().clone());
        repo.create(&Tool::new("1", "Chave de Fenda", "Manual", "Manutenção A"))
            .await
            .unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        set_tools_status(&mut tx, &["1".to_string()], ToolStatus::Unavailable)
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        let tool = repo.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(tool.status, ToolStatus::Available);
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_before_commit() {
        let db = setup_test_db().await;

        let mut tx = db.pool().begin().await.unwrap();
        let result = set_tools_status(&mut tx, &["ghost".to_string()], ToolStatus::Unavailable).await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }
}
