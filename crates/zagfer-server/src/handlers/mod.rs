//! HTTP handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod history;
pub mod loans;
pub mod tools;
pub mod users;
