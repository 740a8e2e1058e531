//! Tab indexer: parses one raw grid into an ordered header and data rows.

use crate::error::{GridError, GridResult};
use crate::table::{RawRow, Table};
use indexmap::IndexMap;
use tabstore_types::Tab;

/// Column used for key lookup unless a record type declares another.
pub const DEFAULT_KEY_COLUMN: &str = "id";

/// Parse a tab's grid into a [`Table`].
///
/// The header is read from the first grid row, left to right, stopping at the
/// first cell without a formatted value; columns beyond that point are
/// ignored even when populated in later rows. Data rows follow from remote
/// row 2. The first fully blank row ends the data, which keeps large padded
/// tabs from producing thousands of empty records.
///
/// # Errors
///
/// Returns an error naming the tab and remote row number when a non-blank
/// row has no value in `key_column`.
pub fn parse_tab(tab: &Tab, key_column: &str) -> GridResult<Table> {
    let grid = tab.grid_rows();

    let mut header = Vec::new();
    if let Some(first) = grid.first() {
        for cell in &first.values {
            match cell.formatted_value.as_deref().filter(|text| !text.is_empty()) {
                Some(text) => header.push(text.to_string()),
                None => break,
            }
        }
    }

    let mut rows = Vec::new();
    for (grid_index, data) in grid.iter().enumerate().skip(1) {
        // Header occupies remote row 1, so the grid row at 0-based index i
        // sits at remote position i + 1.
        let row = grid_index as u64 + 1;
        let mut fields = IndexMap::new();
        for (column_index, column) in header.iter().enumerate() {
            let text = data
                .values
                .get(column_index)
                .and_then(|cell| cell.formatted_value.as_deref())
                .filter(|text| !text.is_empty());
            if let Some(text) = text {
                fields.insert(column.clone(), text.to_string());
            }
        }

        let record = RawRow { row, fields };
        if record.is_blank() {
            // First fully blank row is treated as end-of-data.
            break;
        }
        if record.get(key_column).is_none() {
            return Err(GridError::MissingKeyColumn {
                tab: tab.title().to_string(),
                row,
                key: key_column.to_string(),
            });
        }
        rows.push(record);
    }

    Ok(Table { header, rows })
}
