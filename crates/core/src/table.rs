//! Parsed table shapes produced by the tab indexer.

use indexmap::IndexMap;

/// One data row as parsed from a tab: its 1-based remote position plus the
/// populated header columns in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based position within the remote tab. Never 0 for a parsed row.
    pub row: u64,
    /// Column name to cell text, insertion-ordered by header position.
    pub fields: IndexMap<String, String>,
}

impl RawRow {
    /// A row with no populated header columns at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }

    /// Cell text of one column, if populated.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Header and data rows parsed from one tab.
///
/// The header is fixed once parsed; its length and order define the encoding
/// position of every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Ordered column names from remote row 1.
    pub header: Vec<String>,
    /// Data rows, starting at remote row 2.
    pub rows: Vec<RawRow>,
}

impl Table {
    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
