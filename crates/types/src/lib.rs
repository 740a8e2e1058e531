//! # tabstore-types
//!
//! Serde models of the spreadsheet REST protocol.
//!
//! This crate provides:
//! - The document/tab/grid shapes returned by a full document read
//! - Value range and update/append response shapes used by row operations

/// Document, tab and grid cell models.
pub mod document;
/// Value range and mutation response models.
pub mod values;

pub use document::{CellData, Document, DocumentProperties, GridData, GridProperties, RowData, Tab, TabProperties};
pub use values::{AppendValuesResponse, UpdateValuesResponse, ValueRange};
