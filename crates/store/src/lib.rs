//! # tabstore
//!
//! A spreadsheet-backed row store: tabs become typed row collections with
//! schema validation, in-memory key indexing, and create/update/find
//! operations translated into spreadsheet REST calls.
//!
//! Suited to applications that want simple persistent storage without
//! running a database server. The live spreadsheet is the database: one tab
//! per table, header in remote row 1, data from remote row 2.
//!
//! ```no_run
//! use tabstore::{ColumnType, FieldValue, GridResult, Record, RowStore, TableClient};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Member {
//!     row: u64,
//!     id: FieldValue,
//!     name: FieldValue,
//! }
//!
//! impl Record for Member {
//!     fn header() -> &'static [&'static str] {
//!         &["id", "name"]
//!     }
//!     fn column_type(_column: &str) -> ColumnType {
//!         ColumnType::String
//!     }
//!     fn row(&self) -> u64 {
//!         self.row
//!     }
//!     fn set_row(&mut self, row: u64) {
//!         self.row = row;
//!     }
//!     fn value(&self, column: &str) -> FieldValue {
//!         match column {
//!             "id" => self.id.clone(),
//!             "name" => self.name.clone(),
//!             _ => FieldValue::Null,
//!         }
//!     }
//!     fn set_value(&mut self, column: &str, value: FieldValue) -> GridResult<()> {
//!         match column {
//!             "id" => self.id = value,
//!             "name" => self.name = value,
//!             other => return Err(tabstore::GridError::UnknownColumn(other.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> GridResult<()> {
//! let client = TableClient::new("document-id", "access-key")?;
//! let indexed = client.index_document(None).await?;
//! let mut members: RowStore<Member> =
//!     RowStore::new(client, "Members", &indexed.tables["Members"])?;
//!
//! let created = members
//!     .save(Member {
//!         id: "m1".into(),
//!         name: "Alice".into(),
//!         ..Member::default()
//!     })
//!     .await?;
//! assert!(created.row() > 0);
//! # Ok(())
//! # }
//! ```

/// The per-tab row store.
pub mod store;

pub use store::RowStore;

pub use tabstore_core::{
    decode, encode, parse_tab, unset_date, ColumnType, FieldValue, GridError, GridResult, RawRow,
    Record, Table, DEFAULT_KEY_COLUMN, NIL,
};
pub use tabstore_http::{IndexedDocument, TableClient, BASE_URL};
pub use tabstore_types::{Document, Tab, UpdateValuesResponse, ValueRange};
