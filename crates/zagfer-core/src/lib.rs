//! Core types shared across the ZAGFER tool-room tracker.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::Matricula;
