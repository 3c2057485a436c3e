//! Report and voucher generation for the ZAGFER tool room tracker.
//!
//! Two output formats:
//!
//! - [`csv`] - quoted, BOM-prefixed CSV tables, with the standard column
//!   sets in [`tables`]
//! - [`receipt`] - structured plaintext checkout/return vouchers

pub mod csv;
pub mod receipt;
pub mod tables;

pub use csv::{Column, export_table};
pub use receipt::{Receipt, ReceiptRow, render_receipt};
