use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Root object returned by a full document read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub spreadsheet_id: String,
    pub properties: DocumentProperties,
    pub sheets: Vec<Tab>,
    pub spreadsheet_url: String,
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentProperties {
    pub title: String,
    pub locale: Option<String>,
    pub time_zone: Option<String>,
}

/// One sheet within a document, treated as one table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tab {
    pub properties: TabProperties,
    pub data: Vec<GridData>,
}

impl Tab {
    /// Tab title, the table name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.properties.title
    }

    /// Rows of the first grid range. Empty when the document was read
    /// without grid data.
    #[must_use]
    pub fn grid_rows(&self) -> &[RowData] {
        self.data.first().map_or(&[], |grid| grid.row_data.as_slice())
    }
}

/// Tab-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabProperties {
    pub sheet_id: u64,
    pub title: String,
    pub index: u32,
    pub grid_properties: GridProperties,
}

/// Grid dimensions of a tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridProperties {
    pub row_count: u64,
    pub column_count: u64,
}

/// One contiguous block of grid cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridData {
    pub start_row: u64,
    pub start_column: u64,
    pub row_data: Vec<RowData>,
}

/// One grid row of cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowData {
    pub values: Vec<CellData>,
}

/// One grid cell. Only the formatted text value is consumed; the entered and
/// effective representations are carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellData {
    pub formatted_value: Option<String>,
    pub user_entered_value: Option<JsonValue>,
    pub effective_value: Option<JsonValue>,
    pub user_entered_format: Option<JsonValue>,
}

impl CellData {
    /// A cell holding only a formatted text value.
    #[must_use]
    pub fn text<S: Into<String>>(value: S) -> Self {
        CellData {
            formatted_value: Some(value.into()),
            ..CellData::default()
        }
    }
}
