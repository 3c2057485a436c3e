//! HTTP surface for the ZAGFER tool room tracker.
//!
//! A thin axum layer over the entity store and the service crate. Tool
//! status and history appends are reachable only through the loan
//! endpoints; catalog and roster endpoints never touch them. The acting
//! user is a plaintext matricula carried as a query parameter and
//! re-resolved on every privileged call.
//!
//! The binary wires [`AppState`] to a plain `SqliteStore`. The
//! cache-backed `StoreWithFallback` decorator in `zagfer_storage` is a
//! library-level capability for embedders whose primary store can go
//! away at runtime; a local SQLite file has no such failure mode, so
//! the shipped server does not layer it in.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
