//! Domain models for tools, users, and the checkout/return history.

pub mod history;
pub mod tool;
pub mod user;

pub use history::{ActionType, HistoryRecord};
pub use tool::{Tool, ToolStatus};
pub use user::{Role, User};
