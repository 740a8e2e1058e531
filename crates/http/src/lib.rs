//! # tabstore-http
//!
//! Remote table client for the spreadsheet REST API.
//!
//! Issues the document read, row range read, row update and row append calls
//! consumed by the row store, and raises a uniform error when a call does not
//! succeed. Authentication beyond the access key (bearer tokens, sessions) is
//! the caller's concern; this layer only appends the key to every request.

use indexmap::IndexMap;
use reqwest::{Client, Method};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tabstore_core::{parse_tab, GridError, GridResult, Table, DEFAULT_KEY_COLUMN};
use tabstore_types::{AppendValuesResponse, Document, UpdateValuesResponse, ValueRange};

/// Default endpoint of the spreadsheet REST service.
pub const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Client for one spreadsheet document.
#[derive(Debug, Clone)]
pub struct TableClient {
    client: Client,
    base_url: String,
    document_id: String,
    access_key: String,
}

/// A document paired with the tables parsed from its tabs, keyed by tab
/// title in tab order.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub document: Document,
    pub tables: IndexMap<String, Table>,
}

impl TableClient {
    /// Constructs a client for one document.
    ///
    /// The underlying HTTP client uses a 30-second default timeout and
    /// bypasses system proxy lookup.
    ///
    /// # Errors
    ///
    /// Returns a `GridError::Http` if building the underlying HTTP client
    /// fails.
    pub fn new(document_id: impl Into<String>, access_key: impl Into<String>) -> GridResult<Self> {
        Self::with_timeout(document_id, access_key, 30)
    }

    /// Constructs a client with a custom per-request timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns a `GridError::Http` if building the underlying HTTP client
    /// fails.
    pub fn with_timeout(
        document_id: impl Into<String>,
        access_key: impl Into<String>,
        timeout_secs: u64,
    ) -> GridResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| GridError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            document_id: document_id.into(),
            access_key: access_key.into(),
        })
    }

    /// Replace the service base URL. Used to point at a test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The document this client talks to.
    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Perform one REST call and parse the JSON response body.
    ///
    /// The URL is composed from the base endpoint, the document identifier
    /// and `path`, with the access key appended as a query parameter.
    ///
    /// # Errors
    ///
    /// Returns `GridError::Http` when the request cannot be sent and
    /// `GridError::Remote` carrying the response body when the call did not
    /// succeed.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> GridResult<JsonValue> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}/{}{}{}key={}",
            self.base_url, self.document_id, path, separator, self.access_key
        );
        tracing::debug!("Spreadsheet request: {} {}", method, path);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GridError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GridError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(GridError::remote(status.as_u16(), text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch the whole document including grid data.
    pub async fn read_document(&self) -> GridResult<Document> {
        let body = self
            .request(Method::GET, "?includeGridData=true", None)
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Read the document (unless one is supplied) and parse every tab into a
    /// table, keyed by tab title.
    pub async fn index_document(&self, document: Option<Document>) -> GridResult<IndexedDocument> {
        let document = match document {
            Some(document) => document,
            None => self.read_document().await?,
        };

        let mut tables = IndexMap::new();
        for tab in &document.sheets {
            let table = parse_tab(tab, DEFAULT_KEY_COLUMN)?;
            tables.insert(tab.title().to_string(), table);
        }

        Ok(IndexedDocument { document, tables })
    }

    /// Read the value range from `row` to the end of the tab.
    ///
    /// # Errors
    ///
    /// Returns a row position error when `row` is 0.
    pub async fn read_row_range(&self, tab: &str, row: u64) -> GridResult<ValueRange> {
        if row == 0 {
            return Err(GridError::row_not_persisted("read"));
        }
        let path = format!("/values/{}", row_range(tab, row));
        let body = self.request(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Overwrite the row at `row` with already-encoded cell text.
    pub async fn update_row(
        &self,
        tab: &str,
        row: u64,
        values: Vec<String>,
    ) -> GridResult<UpdateValuesResponse> {
        let path = format!(
            "/values/{}?valueInputOption=RAW&includeValuesInResponse=true",
            row_range(tab, row)
        );
        let body = self
            .request(Method::PUT, &path, Some(row_body(values)))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Append a row at `row` with insert semantics.
    ///
    /// # Errors
    ///
    /// Returns `GridError::AppendUnconfirmed` when the response does not
    /// confirm that any ranges were updated.
    pub async fn append_row(
        &self,
        tab: &str,
        row: u64,
        values: Vec<String>,
    ) -> GridResult<UpdateValuesResponse> {
        let path = format!(
            "/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS&includeValuesInResponse=true",
            row_range(tab, row)
        );
        let body = self
            .request(Method::POST, &path, Some(row_body(values)))
            .await?;
        let response: AppendValuesResponse = serde_json::from_value(body)?;
        response.updates.ok_or(GridError::AppendUnconfirmed)
    }
}

/// A1 expression covering `row` to the end of the tab.
fn row_range(tab: &str, row: u64) -> String {
    format!("{tab}!A{row}:ZZ")
}

/// JSON body shared by row update and append.
fn row_body(values: Vec<String>) -> JsonValue {
    serde_json::json!({ "values": [values] })
}
