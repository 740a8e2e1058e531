//! The per-table record trait.

use crate::codec::{decode, encode};
use crate::error::GridResult;
use crate::indexer::DEFAULT_KEY_COLUMN;
use crate::table::RawRow;
use crate::value::{ColumnType, FieldValue};
use indexmap::IndexMap;

/// A typed row bound to one tab's header.
///
/// Each table gets its own record type. The type declares its header and the
/// coercion rule for every column explicitly, so no reflection over field
/// names is needed and decoding never guesses a type from a field's current
/// value. The declared column order (the row position excluded) must equal
/// the tab's header exactly; [`RowStore`] checks this at construction.
///
/// [`RowStore`]: https://docs.rs/tabstore
pub trait Record: Clone + Default {
    /// Column names in on-wire order, excluding the row position.
    fn header() -> &'static [&'static str];

    /// Column used for key lookup.
    fn key_column() -> &'static str {
        DEFAULT_KEY_COLUMN
    }

    /// Coercion rule for a declared column.
    fn column_type(column: &str) -> ColumnType;

    /// 1-based remote row position; 0 means not yet persisted.
    fn row(&self) -> u64;

    /// Replace the remote row position.
    fn set_row(&mut self, row: u64);

    /// Current value of a declared column ([`FieldValue::Null`] when unset).
    fn value(&self, column: &str) -> FieldValue;

    /// Replace the value of a declared column.
    ///
    /// # Errors
    ///
    /// Returns an unknown-column error for a column the record does not
    /// declare.
    fn set_value(&mut self, column: &str, value: FieldValue) -> GridResult<()>;

    /// Value of the key column.
    fn key(&self) -> FieldValue {
        self.value(Self::key_column())
    }

    /// Values in header order.
    fn values(&self) -> Vec<FieldValue> {
        Self::header().iter().map(|column| self.value(column)).collect()
    }

    /// Cell text for every column, in header order.
    fn encoded_values(&self) -> Vec<String> {
        self.values().iter().map(encode).collect()
    }

    /// Re-assign every column from cell text in header order.
    ///
    /// Cells beyond the declared header are ignored; missing trailing cells
    /// null their columns.
    fn assign_positional(&mut self, cells: &[String]) -> GridResult<()> {
        for (index, column) in Self::header().iter().enumerate() {
            let raw = cells.get(index).map_or("", String::as_str);
            self.set_value(column, decode(Self::column_type(column), raw))?;
        }
        Ok(())
    }

    /// Re-assign columns from a name to cell text mapping.
    fn assign_named(&mut self, fields: &IndexMap<String, String>) -> GridResult<()> {
        for (column, raw) in fields {
            self.set_value(column, decode(Self::column_type(column), raw))?;
        }
        Ok(())
    }

    /// Build a record from a parsed raw row.
    fn from_raw(raw: &RawRow) -> GridResult<Self> {
        let mut record = Self::default();
        record.set_row(raw.row);
        record.assign_named(&raw.fields)?;
        Ok(record)
    }
}
