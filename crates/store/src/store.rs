//! The per-tab row store.

use std::collections::HashMap;
use tabstore_core::{encode, FieldValue, GridError, GridResult, Record, Table};
use tabstore_http::TableClient;

/// In-memory view of one tab with schema-checked mutations.
///
/// Holds the parsed header, the typed rows, and two derived indexes: encoded
/// key text to list position, and remote row number to list position. Both
/// indexes are rebuilt in full after every successful mutation; a failed
/// create or update leaves the store exactly as it was. The full rebuild is
/// an O(n)-per-write simplification sized for small tables.
///
/// Writes to one store instance are serialized by `&mut self`; there is no
/// optimistic-concurrency token, so two processes updating the same remote
/// row race at the API and the later write wins.
#[derive(Debug)]
pub struct RowStore<R: Record> {
    client: TableClient,
    tab: String,
    header: Vec<String>,
    rows: Vec<R>,
    key_index: HashMap<String, usize>,
    row_index: HashMap<u64, usize>,
}

impl<R: Record> RowStore<R> {
    /// Build a store for `tab` from a parsed table.
    ///
    /// # Errors
    ///
    /// Returns a header mismatch error when the record's declared header
    /// differs from the table header, and any decode error raised while
    /// turning raw rows into records.
    pub fn new(client: TableClient, tab: impl Into<String>, table: &Table) -> GridResult<Self> {
        let tab = tab.into();
        check_header::<R>(&tab, &table.header)?;

        let rows = table
            .rows
            .iter()
            .map(R::from_raw)
            .collect::<GridResult<Vec<_>>>()?;

        let mut store = Self {
            client,
            tab,
            header: table.header.clone(),
            rows,
            key_index: HashMap::new(),
            row_index: HashMap::new(),
        };
        store.create_index();
        Ok(store)
    }

    /// Ordered column names this store encodes against.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Title of the tab this store is bound to.
    #[must_use]
    pub fn tab(&self) -> &str {
        &self.tab
    }

    /// All rows, in tab order.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Create when the record is unpersisted, update otherwise.
    ///
    /// The only entry point most callers need.
    pub async fn save(&mut self, record: R) -> GridResult<R> {
        if record.row() == 0 {
            self.create(record).await
        } else {
            self.update(record).await
        }
    }

    /// Append a new row to the remote tab and take it into the store.
    ///
    /// The remote side determines the final row position; the returned record
    /// carries the position and any server-side value transformations echoed
    /// back by the append response.
    ///
    /// # Errors
    ///
    /// Requires a non-null key and `row() == 0`; fails when the append is not
    /// confirmed or the remote call does not succeed.
    pub async fn create(&mut self, mut record: R) -> GridResult<R> {
        if record.key().is_null() {
            return Err(GridError::MissingKey(R::key_column().to_string()));
        }
        if record.row() != 0 {
            return Err(GridError::row_not_new("create", record.row()));
        }

        let values = record.encoded_values();
        let updates = self
            .client
            .append_row(&self.tab, self.rows.len() as u64, values)
            .await?;

        if let Some(echoed) = updates.updated_data.as_ref().and_then(|data| data.first_row()) {
            record.assign_positional(echoed)?;
        }
        let row = updates.updated_row().ok_or(GridError::AppendUnconfirmed)?;
        record.set_row(row);
        tracing::debug!("Created row {} in tab '{}'", row, self.tab);

        self.rows.push(record.clone());
        self.create_index();
        Ok(record)
    }

    /// Overwrite an existing remote row and replace the stored entry.
    ///
    /// # Errors
    ///
    /// Requires a non-null key and `row() > 0`; the row number must belong to
    /// a stored row. Fails when the remote call does not succeed.
    pub async fn update(&mut self, mut record: R) -> GridResult<R> {
        if record.key().is_null() {
            return Err(GridError::MissingKey(R::key_column().to_string()));
        }
        let row = record.row();
        if row == 0 {
            return Err(GridError::row_not_persisted("update"));
        }
        // Remote row numbers are not list positions; resolve through the map
        // before touching the remote side.
        let position = self
            .row_index
            .get(&row)
            .copied()
            .ok_or(GridError::RowNotFound(row))?;

        let values = record.encoded_values();
        let updates = self.client.update_row(&self.tab, row, values).await?;

        if let Some(echoed) = updates.updated_data.as_ref().and_then(|data| data.first_row()) {
            record.assign_positional(echoed)?;
        }
        tracing::debug!("Updated row {} in tab '{}'", row, self.tab);

        self.rows[position] = record.clone();
        self.create_index();
        Ok(record)
    }

    /// Look up a row by value.
    ///
    /// With no column given, a numeric value is matched against the row
    /// position. The key column resolves through the key index; any other
    /// column is a linear scan returning the first match.
    #[must_use]
    pub fn find(&self, value: &FieldValue, column: Option<&str>) -> Option<&R> {
        if column.is_none() {
            if let Some(row) = row_position(value) {
                return self.rows.iter().find(|record| record.row() == row);
            }
        }

        let column = column.unwrap_or_else(|| R::key_column());
        if column == R::key_column() {
            return self
                .key_index
                .get(&encode(value))
                .map(|&position| &self.rows[position]);
        }

        self.rows.iter().find(|record| record.value(column) == *value)
    }

    /// Rebuild both indexes from the current row list.
    fn create_index(&mut self) {
        self.key_index.clear();
        self.row_index.clear();
        for (position, record) in self.rows.iter().enumerate() {
            self.key_index.insert(encode(&record.key()), position);
            self.row_index.insert(record.row(), position);
        }
    }
}

/// Interpret a field value as a 1-based row position, if it is numeric.
fn row_position(value: &FieldValue) -> Option<u64> {
    match value {
        FieldValue::Int(n) if *n > 0 => Some(*n as u64),
        FieldValue::Float(f) if *f > 0.0 && f.fract() == 0.0 => Some(*f as u64),
        _ => None,
    }
}

/// Compare the record's declared header against the parsed table header.
fn check_header<R: Record>(tab: &str, header: &[String]) -> GridResult<()> {
    let declared = R::header();
    if declared.len() == header.len() && declared.iter().zip(header).all(|(a, b)| *a == b.as_str()) {
        return Ok(());
    }
    Err(GridError::HeaderMismatch {
        tab: tab.to_string(),
        expected: declared.iter().map(ToString::to_string).collect(),
        found: header.to_vec(),
    })
}
