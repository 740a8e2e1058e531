use serde::{Deserialize, Serialize};

/// An A1 range together with its row-major cell text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueRange {
    pub range: String,
    pub major_dimension: Option<String>,
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    /// First row of values, if any.
    #[must_use]
    pub fn first_row(&self) -> Option<&[String]> {
        self.values.first().map(Vec::as_slice)
    }
}

/// Response to a value range update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: String,
    pub updated_range: String,
    pub updated_rows: u64,
    pub updated_columns: u64,
    pub updated_cells: u64,
    pub updated_data: Option<ValueRange>,
}

impl UpdateValuesResponse {
    /// 1-based row number of the first cell of the updated range.
    #[must_use]
    pub fn updated_row(&self) -> Option<u64> {
        first_row_of_range(&self.updated_range)
    }
}

/// Response to a range append. The append took effect only if `updates`
/// is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppendValuesResponse {
    pub spreadsheet_id: String,
    pub table_range: Option<String>,
    pub updates: Option<UpdateValuesResponse>,
}

/// Parse the 1-based row number out of an A1 range like `People!A5:C5`.
fn first_row_of_range(range: &str) -> Option<u64> {
    let cell = range.rsplit('!').next()?;
    let cell = cell.split(':').next()?;
    let digits: String = cell
        .chars()
        .skip_while(|c| c.is_ascii_alphabetic())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
