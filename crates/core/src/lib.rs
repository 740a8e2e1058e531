//! # tabstore-core
//!
//! Core types for the spreadsheet-backed row store.
//!
//! This crate provides:
//! - Field value and column coercion types
//! - The row codec between typed values and cell text
//! - The tab indexer turning a raw grid into header + rows
//! - The [`Record`] trait implemented per table
//! - Error types and result aliases

/// Row codec between typed field values and cell text.
pub mod codec;
/// Error types and result aliases.
pub mod error;
/// Tab indexer: raw grid to header + rows.
pub mod indexer;
/// The per-table record trait.
pub mod record;
/// Parsed table and raw row types.
pub mod table;
/// Field value and column coercion types.
pub mod value;

pub use codec::{decode, encode};
pub use error::{GridError, GridResult};
pub use indexer::{parse_tab, DEFAULT_KEY_COLUMN};
pub use record::Record;
pub use table::{RawRow, Table};
pub use value::{unset_date, ColumnType, FieldValue, NIL};
