//! Repository traits and their SQLite implementations.

pub mod history;
pub mod tool;
pub mod user;

pub use history::{HistoryRepository, SqliteHistoryRepository};
pub use tool::{SqliteToolRepository, ToolRepository};
pub use user::{SqliteUserRepository, UserRepository};
