#![allow(async_fn_in_trait)]

use crate::error::{StorageError, StorageResult};
use crate::models::User;
use sqlx::SqlitePool;

/// Repository trait for User entity operations
pub trait UserRepository: Send + Sync {
    /// Get all users, ordered by name
    async fn find_all(&self) -> StorageResult<Vec<User>>;

    /// Find a user by their id
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<User>>;

    /// Find a user by their matricula (the login key)
    async fn find_by_matricula(&self, matricula: &str) -> StorageResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> StorageResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> StorageResult<()>;

    /// Delete a user by id
    async fn delete(&self, id: &str) -> StorageResult<()>;

    /// Check if a matricula is already registered
    async fn exists_by_matricula(&self, matricula: &str) -> StorageResult<bool>;
}

/// SQLite implementation of UserRepository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new SQLite user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn find_all(&self) -> StorageResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, matricula, active, role, created_at, updated_at
            FROM users
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, matricula, active, role, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_matricula(&self, matricula: &str) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, matricula, active, role, created_at, updated_at
            FROM users
            WHERE matricula = ?
            "#,
        )
        .bind(matricula)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: &User) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, matricula, active, role)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.matricula)
        .bind(user.active)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, matricula = ?, active = ?, role = ?,
                updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.matricula)
        .bind(user.active)
        .bind(user.role)
        .bind(&user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity_type: "User".to_string(),
                field: "id".to_string(),
                value: user.id.clone(),
            });
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity_type: "User".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            });
        }

        Ok(())
    }

    async fn exists_by_matricula(&self, matricula: &str) -> StorageResult<bool> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE matricula = ?")
            .bind(matricula)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }
}
