#![allow(async_fn_in_trait)]

//! The Entity Store contract and its implementations.
//!
//! The store is the only component that owns persisted records. The
//! transaction processor is its sole writer path for tool status and
//! history appends; those two coupled mutations go through
//! [`EntityStore::apply_loan_mutation`] so a store can apply them as one
//! unit. Stores advertise whether they actually can via
//! [`EntityStore::supports_atomic_apply`], and callers are expected to
//! fail loudly rather than accept a split write.

mod fallback;
mod memory;
mod sqlite;

pub use fallback::{StoreWithFallback, WritePolicy};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::models::{HistoryRecord, Tool, ToolStatus, User};
use chrono::{DateTime, Utc};
use zagfer_core::Result;

/// Read/write contract over the persisted entities.
///
/// All reads return snapshots; derived views (active checkouts, alerts)
/// are recomputed from them and never stored. Absence is `Ok(None)` or an
/// empty vec, never an error; unknown ids on writes are
/// `Error::NotFound`.
pub trait EntityStore: Send + Sync {
    /// All tools in the catalog
    async fn list_tools(&self) -> Result<Vec<Tool>>;

    /// All registered users
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Full history, newest appended first
    async fn list_history(&self) -> Result<Vec<HistoryRecord>>;

    /// Look up a user by matricula (the login key)
    async fn find_user_by_matricula(&self, matricula: &str) -> Result<Option<User>>;

    /// Create a tool, returning the persisted entity
    async fn create_tool(&self, tool: &Tool) -> Result<Tool>;

    /// Update a tool, returning the persisted entity
    async fn update_tool(&self, tool: &Tool) -> Result<Tool>;

    /// Delete a tool; history keeps any stale references
    async fn delete_tool(&self, id: &str) -> Result<()>;

    /// Set the status of several tools at once
    async fn set_tools_status(&self, ids: &[String], status: ToolStatus) -> Result<()>;

    /// Create a user, returning the persisted entity
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Update a user, returning the persisted entity
    async fn update_user(&self, user: &User) -> Result<User>;

    /// Delete a user
    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Append a history record, returning the persisted entity
    async fn append_history(&self, record: &HistoryRecord) -> Result<HistoryRecord>;

    /// Update a record's expected return date in place (renewal)
    async fn update_history_deadline(&self, id: &str, deadline: DateTime<Utc>) -> Result<()>;

    /// Whether `apply_loan_mutation` is genuinely atomic in this store
    fn supports_atomic_apply(&self) -> bool;

    /// Apply one loan operation: flip the status of `ids` and append
    /// `record`, as a single unit when the store supports it.
    async fn apply_loan_mutation(
        &self,
        ids: &[String],
        status: ToolStatus,
        record: &HistoryRecord,
    ) -> Result<()>;
}
