//! Storage layer for the ZAGFER tool room tracker.
//!
//! This crate provides SQLite-backed persistence for tools, users, and the
//! append-only transaction history, plus the [`EntityStore`] contract the
//! rest of the system talks to.
//!
//! # Architecture
//!
//! The storage layer uses a repository pattern with the following components:
//!
//! - [`Database`] - Connection pool manager with automatic migrations
//! - [`ToolRepository`], [`UserRepository`], [`HistoryRepository`] - Data access traits
//! - [`EntityStore`] - The coarse-grained store contract consumed by the
//!   transaction processor and the HTTP layer
//! - [`StoreWithFallback`] - Primary store with an in-memory cache that
//!   keeps the counter operating through a database outage
//! - [`transaction`] - Transaction-aware operations for atomic multi-step writes
//!
//! # Core Concepts
//!
//! ## Append-only history
//!
//! History rows are never updated or deleted once written, with one
//! exception: loan renewal rewrites `expected_return_date` in place.
//! Everything derived from history (active checkouts, overdue alerts,
//! usage statistics) is recomputed from the log on demand and never
//! persisted.
//!
//! ## Coupled loan writes
//!
//! A checkout or return flips tool statuses AND appends a history record.
//! Those two writes go through [`EntityStore::apply_loan_mutation`] so the
//! SQLite store can run them in a single transaction.
//!
//! # Examples
//!
//! ## Basic setup
//!
//! ```no_run
//! use zagfer_storage::{Database, DatabaseConfig, SqliteStore, EntityStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DatabaseConfig::new("zagfer.db")
//!     .max_connections(10)
//!     .auto_migrate(true);
//!
//! let db = Database::new(config).await?;
//! let store = SqliteStore::new(db.pool().clone());
//!
//! for tool in store.list_tools().await? {
//!     println!("{} [{}]", tool.name, tool.status.display_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Using repositories directly
//!
//! ```no_run
//! use zagfer_storage::{Database, DatabaseConfig};
//! use zagfer_storage::repositories::{SqliteUserRepository, UserRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("zagfer.db")).await?;
//! let users = SqliteUserRepository::new(db.pool().clone());
//!
//! if let Some(user) = users.find_by_matricula("4021").await? {
//!     println!("{} ({})", user.name, user.role.display_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;
pub mod store;
pub mod transaction;

pub use connection::{Database, DatabaseConfig};
pub use error::{StorageError, StorageResult};
pub use models::{ActionType, HistoryRecord, Role, Tool, ToolStatus, User};
pub use repositories::{
    HistoryRepository, SqliteHistoryRepository, SqliteToolRepository, SqliteUserRepository,
    ToolRepository, UserRepository,
};
pub use store::{EntityStore, MemoryStore, SqliteStore, StoreWithFallback, WritePolicy};
