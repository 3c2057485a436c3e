//! Primary store with an in-memory fallback cache.
//!
//! Reads go to the primary and refresh the cache on the way out; when the
//! primary is unreachable the last cached snapshot is served instead.
//! Writes land in the cache first and then in the primary. What happens
//! when the primary write fails is governed by [`WritePolicy`].

use chrono::{DateTime, Utc};
use tracing::warn;
use zagfer_core::{Error, Result};

use super::{EntityStore, MemoryStore};
use crate::models::{HistoryRecord, Tool, ToolStatus, User};

/// How a failed primary write is reconciled with the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Keep the cached write and report success; the divergence is
    /// logged. Matches the expectation that the counter keeps operating
    /// through a database outage.
    #[default]
    Optimistic,
    /// Roll the cache back to its pre-write state and surface the error.
    Strict,
}

/// [`EntityStore`] that layers a [`MemoryStore`] cache over a primary.
pub struct StoreWithFallback<P: EntityStore> {
    primary: P,
    cache: MemoryStore,
    policy: WritePolicy,
}

impl<P: EntityStore> StoreWithFallback<P> {
    pub fn new(primary: P) -> Self {
        Self::with_policy(primary, WritePolicy::default())
    }

    pub fn with_policy(primary: P, policy: WritePolicy) -> Self {
        Self {
            primary,
            cache: MemoryStore::new(),
            policy,
        }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Resolve a primary write failure against the cache snapshot taken
    /// before the write.
    fn settle<T>(
        &self,
        operation: &str,
        snapshot: super::memory::Snapshot,
        cached: T,
        err: Error,
    ) -> Result<T> {
        match self.policy {
            WritePolicy::Optimistic => {
                warn!(operation, error = %err, "primary write failed, keeping cached write");
                Ok(cached)
            }
            WritePolicy::Strict => {
                self.cache.restore(snapshot);
                Err(err)
            }
        }
    }
}

impl<P: EntityStore> EntityStore for StoreWithFallback<P> {
    async fn list_tools(&self) -> Result<Vec<Tool>> {
        match self.primary.list_tools().await {
            Ok(tools) => {
                self.cache.replace_tools(tools.clone());
                Ok(tools)
            }
            Err(err) => {
                warn!(error = %err, "primary unreachable, serving cached tools");
                self.cache.list_tools().await
            }
        }
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        match self.primary.list_users().await {
            Ok(users) => {
                self.cache.replace_users(users.clone());
                Ok(users)
            }
            Err(err) => {
                warn!(error = %err, "primary unreachable, serving cached users");
                self.cache.list_users().await
            }
        }
    }

    async fn list_history(&self) -> Result<Vec<HistoryRecord>> {
        match self.primary.list_history().await {
            Ok(history) => {
                self.cache.replace_history(history.clone());
                Ok(history)
            }
            Err(err) => {
                warn!(error = %err, "primary unreachable, serving cached history");
                self.cache.list_history().await
            }
        }
    }

    async fn find_user_by_matricula(&self, matricula: &str) -> Result<Option<User>> {
        match self.primary.find_user_by_matricula(matricula).await {
            Ok(user) => Ok(user),
            Err(err) => {
                warn!(error = %err, "primary unreachable, matching matricula against cache");
                self.cache.find_user_by_matricula(matricula).await
            }
        }
    }

    async fn create_tool(&self, tool: &Tool) -> Result<Tool> {
        let snapshot = self.cache.snapshot();
        let cached = self.cache.create_tool(tool).await?;
        match self.primary.create_tool(tool).await {
            Ok(tool) => Ok(tool),
            Err(err) => self.settle("create_tool", snapshot, cached, err),
        }
    }

    async fn update_tool(&self, tool: &Tool) -> Result<Tool> {
        let snapshot = self.cache.snapshot();
        let cached = self.cache.update_tool(tool).await?;
        match self.primary.update_tool(tool).await {
            Ok(tool) => Ok(tool),
            Err(err) => self.settle("update_tool", snapshot, cached, err),
        }
    }

    async fn delete_tool(&self, id: &str) -> Result<()> {
        let snapshot = self.cache.snapshot();
        self.cache.delete_tool(id).await?;
        match self.primary.delete_tool(id).await {
            Ok(()) => Ok(()),
            Err(err) => self.settle("delete_tool", snapshot, (), err),
        }
    }

    async fn set_tools_status(&self, ids: &[String], status: ToolStatus) -> Result<()> {
        let snapshot = self.cache.snapshot();
        self.cache.set_tools_status(ids, status).await?;
        match self.primary.set_tools_status(ids, status).await {
            Ok(()) => Ok(()),
            Err(err) => self.settle("set_tools_status", snapshot, (), err),
        }
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let snapshot = self.cache.snapshot();
        let cached = self.cache.create_user(user).await?;
        match self.primary.create_user(user).await {
            Ok(user) => Ok(user),
            Err(err) => self.settle("create_user", snapshot, cached, err),
        }
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let snapshot = self.cache.snapshot();
        let cached = self.cache.update_user(user).await?;
        match self.primary.update_user(user).await {
            Ok(user) => Ok(user),
            Err(err) => self.settle("update_user", snapshot, cached, err),
        }
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let snapshot = self.cache.snapshot();
        self.cache.delete_user(id).await?;
        match self.primary.delete_user(id).await {
            Ok(()) => Ok(()),
            Err(err) => self.settle("delete_user", snapshot, (), err),
        }
    }

    async fn append_history(&self, record: &HistoryRecord) -> Result<HistoryRecord> {
        let snapshot = self.cache.snapshot();
        let cached = self.cache.append_history(record).await?;
        match self.primary.append_history(record).await {
            Ok(record) => Ok(record),
            Err(err) => self.settle("append_history", snapshot, cached, err),
        }
    }

    async fn update_history_deadline(&self, id: &str, deadline: DateTime<Utc>) -> Result<()> {
        let snapshot = self.cache.snapshot();
        self.cache.update_history_deadline(id, deadline).await?;
        match self.primary.update_history_deadline(id, deadline).await {
            Ok(()) => Ok(()),
            Err(err) => self.settle("update_history_deadline", snapshot, (), err),
        }
    }

    fn supports_atomic_apply(&self) -> bool {
        self.primary.supports_atomic_apply()
    }

    async fn apply_loan_mutation(
        &self,
        ids: &[String],
        status: ToolStatus,
        record: &HistoryRecord,
    ) -> Result<()> {
        let snapshot = self.cache.snapshot();
        self.cache.apply_loan_mutation(ids, status, record).await?;
        match self.primary.apply_loan_mutation(ids, status, record).await {
            Ok(()) => Ok(()),
            Err(err) => self.settle("apply_loan_mutation", snapshot, (), err),
        }
    }
}
