//! In-memory [`EntityStore`] backed by `RwLock`-guarded tables.
//!
//! Used as the cache half of [`StoreWithFallback`](super::StoreWithFallback)
//! and as a lightweight store in tests. All mutations run under one write
//! lock, so `apply_loan_mutation` is atomic here too.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use zagfer_core::{Error, Result};

use super::EntityStore;
use crate::models::{HistoryRecord, Tool, ToolStatus, User};

#[derive(Debug, Default, Clone)]
struct Tables {
    tools: Vec<Tool>,
    users: Vec<User>,
    // Newest record first, matching the natural history order.
    history: Vec<HistoryRecord>,
}

/// Volatile store holding every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

/// Point-in-time copy of every table, for rollback.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    tables: Tables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        match self.tables.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        match self.tables.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            tables: self.read().clone(),
        }
    }

    pub(crate) fn restore(&self, snapshot: Snapshot) {
        *self.write() = snapshot.tables;
    }

    /// Replace a whole table with fresh rows, keeping the others intact.
    pub(crate) fn replace_tools(&self, tools: Vec<Tool>) {
        self.write().tools = tools;
    }

    pub(crate) fn replace_users(&self, users: Vec<User>) {
        self.write().users = users;
    }

    pub(crate) fn replace_history(&self, history: Vec<HistoryRecord>) {
        self.write().history = history;
    }
}

impl EntityStore for MemoryStore {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        let mut tools = self.read().tools.clone();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tools)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users = self.read().users.clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn list_history(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self.read().history.clone())
    }

    async fn find_user_by_matricula(&self, matricula: &str) -> Result<Option<User>> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| u.matricula == matricula)
            .cloned())
    }

    async fn create_tool(&self, tool: &Tool) -> Result<Tool> {
        let mut tables = self.write();
        if tables.tools.iter().any(|t| t.id == tool.id) {
            return Err(Error::validation(format!(
                "Ferramenta com id {} já existe",
                tool.id
            )));
        }
        tables.tools.push(tool.clone());
        Ok(tool.clone())
    }

    async fn update_tool(&self, tool: &Tool) -> Result<Tool> {
        let mut tables = self.write();
        match tables.tools.iter_mut().find(|t| t.id == tool.id) {
            Some(slot) => {
                *slot = tool.clone();
                Ok(tool.clone())
            }
            None => Err(Error::not_found("ferramenta", &tool.id)),
        }
    }

    async fn delete_tool(&self, id: &str) -> Result<()> {
        let mut tables = self.write();
        let before = tables.tools.len();
        tables.tools.retain(|t| t.id != id);
        if tables.tools.len() == before {
            return Err(Error::not_found("ferramenta", id));
        }
        Ok(())
    }

    async fn set_tools_status(&self, ids: &[String], status: ToolStatus) -> Result<()> {
        let mut tables = self.write();
        for id in ids {
            match tables.tools.iter_mut().find(|t| &t.id == id) {
                Some(tool) => {
                    tool.status = status;
                    tool.updated_at = Utc::now();
                }
                None => return Err(Error::not_found("ferramenta", id)),
            }
        }
        Ok(())
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let mut tables = self.write();
        if tables.users.iter().any(|u| u.id == user.id) {
            return Err(Error::validation(format!(
                "Usuário com id {} já existe",
                user.id
            )));
        }
        if tables.users.iter().any(|u| u.matricula == user.matricula) {
            return Err(Error::validation(format!(
                "Matrícula {} já cadastrada",
                user.matricula
            )));
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut tables = self.write();
        match tables.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user.clone())
            }
            None => Err(Error::not_found("usuário", &user.id)),
        }
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut tables = self.write();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(Error::not_found("usuário", id));
        }
        Ok(())
    }

    async fn append_history(&self, record: &HistoryRecord) -> Result<HistoryRecord> {
        self.write().history.insert(0, record.clone());
        Ok(record.clone())
    }

    async fn update_history_deadline(&self, id: &str, deadline: DateTime<Utc>) -> Result<()> {
        let mut tables = self.write();
        match tables.history.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.expected_return_date = Some(deadline);
                Ok(())
            }
            None => Err(Error::not_found("registro de histórico", id)),
        }
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
        let mut tables = self.write();
        for id in ids {
            if !tables.tools.iter().any(|t| &t.id == id) {
                return Err(Error::not_found("ferramenta", id));
            }
        }
        for id in ids {
            if let Some(tool) = tables.tools.iter_mut().find(|t| &t.id == id) {
                tool.status = status;
                tool.updated_at = Utc::now();
            }
        }
        tables.history.insert(0, record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionType, Role};

    fn tool(id: &str, name: &str) -> Tool {
        Tool::new(id.to_string(), name.to_string(), "Manual".to_string(), "A".to_string())
    }

    fn checkout(id: &str, tool_ids: Vec<String>) -> HistoryRecord {
        HistoryRecord::new(
            id.to_string(),
            Utc::now(),
            ActionType::Checkout,
            "u1".to_string(),
            "Ana".to_string(),
            "1001".to_string(),
            "Bruno".to_string(),
            "2002".to_string(),
            tool_ids,
            "ferramentas".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn create_then_list_sorts_by_name() {
        let store = MemoryStore::new();
        store.create_tool(&tool("t2", "Serra")).await.unwrap();
        store.create_tool(&tool("t1", "Alicate")).await.unwrap();

        let tools = store.list_tools().await.unwrap();
        assert_eq!(tools[0].name, "Alicate");
        assert_eq!(tools[1].name, "Serra");
    }

    #[tokio::test]
    async fn duplicate_matricula_is_rejected() {
        let store = MemoryStore::new();
        let a = User::new("u1".to_string(), "Ana".to_string(), "1001".to_string(), Role::User);
        let mut b = User::new("u2".to_string(), "Bia".to_string(), "1001".to_string(), Role::User);
        store.create_user(&a).await.unwrap();
        let err = store.create_user(&b).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        b.matricula = "1002".to_string();
        store.create_user(&b).await.unwrap();
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let store = MemoryStore::new();
        store.append_history(&checkout("h1", vec![])).await.unwrap();
        store.append_history(&checkout("h2", vec![])).await.unwrap();

        let history = store.list_history().await.unwrap();
        assert_eq!(history[0].id, "h2");
        assert_eq!(history[1].id, "h1");
    }

    #[tokio::test]
    async fn loan_mutation_with_unknown_tool_changes_nothing() {
        let store = MemoryStore::new();
        store.create_tool(&tool("t1", "Serra")).await.unwrap();

        let ids = vec!["t1".to_string(), "ghost".to_string()];
        let err = store
            .apply_loan_mutation(&ids, ToolStatus::Unavailable, &checkout("h1", ids.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        let tools = store.list_tools().await.unwrap();
        assert_eq!(tools[0].status, ToolStatus::Available);
        assert!(store.list_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn snapshot_restore_round_trip() {
        let store = MemoryStore::new();
        store.create_tool(&tool("t1", "Serra")).await.unwrap();
        let snapshot = store.snapshot();

        store.delete_tool("t1").await.unwrap();
        assert!(store.list_tools().await.unwrap().is_empty());

        store.restore(snapshot);
        assert_eq!(store.list_tools().await.unwrap().len(), 1);
    }
}
