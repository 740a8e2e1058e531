use indexmap::IndexMap;
use serde_json::json;
use tabstore::{
    ColumnType, FieldValue, GridError, GridResult, RawRow, Record, RowStore, Table, TableClient,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, Default, PartialEq)]
struct Member {
    row: u64,
    id: FieldValue,
    name: FieldValue,
}

impl Record for Member {
    fn header() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn column_type(_column: &str) -> ColumnType {
        ColumnType::String
    }

    fn row(&self) -> u64 {
        self.row
    }

    fn set_row(&mut self, row: u64) {
        self.row = row;
    }

    fn value(&self, column: &str) -> FieldValue {
        match column {
            "id" => self.id.clone(),
            "name" => self.name.clone(),
            _ => FieldValue::Null,
        }
    }

    fn set_value(&mut self, column: &str, value: FieldValue) -> GridResult<()> {
        match column {
            "id" => self.id = value,
            "name" => self.name = value,
            other => return Err(GridError::UnknownColumn(other.to_string())),
        }
        Ok(())
    }
}

fn member(id: &str, name: &str) -> Member {
    Member {
        row: 0,
        id: id.into(),
        name: name.into(),
    }
}

fn member_table(rows: &[(u64, &str, &str)]) -> Table {
    Table {
        header: vec!["id".to_string(), "name".to_string()],
        rows: rows
            .iter()
            .map(|&(row, id, name)| {
                let mut fields = IndexMap::new();
                fields.insert("id".to_string(), id.to_string());
                fields.insert("name".to_string(), name.to_string());
                RawRow { row, fields }
            })
            .collect(),
    }
}

fn local_client() -> TableClient {
    TableClient::new("doc1", "secret").unwrap()
}

async fn store_against(server: &MockServer, table: &Table) -> RowStore<Member> {
    let client = local_client().with_base_url(server.uri());
    RowStore::new(client, "Members", table).unwrap()
}

fn update_response(range: &str, values: serde_json::Value) -> serde_json::Value {
    json!({
        "spreadsheetId": "doc1",
        "updatedRange": range,
        "updatedRows": 1,
        "updatedColumns": 2,
        "updatedCells": 2,
        "updatedData": { "range": range, "values": [values] }
    })
}

// ===== Construction =====

#[test]
fn header_mismatch_is_a_schema_error() {
    let table = Table {
        header: vec!["id".to_string(), "email".to_string()],
        rows: vec![],
    };
    let err = RowStore::<Member>::new(local_client(), "Members", &table).unwrap_err();
    match err {
        GridError::HeaderMismatch { tab, expected, found } => {
            assert_eq!(tab, "Members");
            assert_eq!(expected, vec!["id", "name"]);
            assert_eq!(found, vec!["id", "email"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rows_are_decoded_and_indexed_at_construction() {
    let table = member_table(&[(2, "a", "Alice"), (3, "b", "Bob")]);
    let store = RowStore::<Member>::new(local_client(), "Members", &table).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.header(), ["id", "name"]);
    assert_eq!(store.rows()[0].row(), 2);
    assert_eq!(store.rows()[1].name, FieldValue::String("Bob".to_string()));
}

// ===== find =====

#[test]
fn find_by_key_matches_a_linear_scan() {
    let table = member_table(&[(2, "a", "Alice"), (3, "b", "Bob"), (4, "c", "Cara")]);
    let store = RowStore::<Member>::new(local_client(), "Members", &table).unwrap();

    for record in store.rows() {
        let scanned = store
            .rows()
            .iter()
            .find(|candidate| candidate.id == record.id);
        assert_eq!(store.find(&record.id, Some("id")), scanned);
    }
}

#[test]
fn find_defaults_to_the_key_column() {
    let table = member_table(&[(2, "a", "Alice")]);
    let store = RowStore::<Member>::new(local_client(), "Members", &table).unwrap();

    let found = store.find(&"a".into(), None).unwrap();
    assert_eq!(found.name, FieldValue::String("Alice".to_string()));
    assert!(store.find(&"missing".into(), None).is_none());
}

#[test]
fn find_numeric_without_column_resolves_by_row_position() {
    let table = member_table(&[(2, "a", "Alice"), (3, "b", "Bob")]);
    let store = RowStore::<Member>::new(local_client(), "Members", &table).unwrap();

    let found = store.find(&3.into(), None).unwrap();
    assert_eq!(found.id, FieldValue::String("b".to_string()));
    assert!(store.find(&9.into(), None).is_none());
}

#[test]
fn find_on_a_non_key_column_scans_for_the_first_match() {
    let table = member_table(&[(2, "a", "Alice"), (3, "b", "Twin"), (4, "c", "Twin")]);
    let store = RowStore::<Member>::new(local_client(), "Members", &table).unwrap();

    let found = store.find(&"Twin".into(), Some("name")).unwrap();
    assert_eq!(found.row(), 3);
    assert!(store.find(&"Zoe".into(), Some("name")).is_none());
}

// ===== create =====

#[tokio::test]
async fn create_on_an_empty_table_appends_at_position_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/doc1/values/Members!A0:ZZ:append"))
        .and(body_json(json!({ "values": [["x", "n"]] })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "spreadsheetId": "doc1",
                "tableRange": "Members!A1:B1",
                "updates": update_response("Members!A2:B2", json!(["x", "n"]))
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[])).await;
    let created = store.create(member("x", "n")).await.unwrap();

    assert_eq!(created.row(), 2);
    assert_eq!(created.id, FieldValue::String("x".to_string()));
    assert_eq!(store.len(), 1);

    // The key index now resolves the new key.
    let found = store.find(&"x".into(), None).unwrap();
    assert_eq!(found.row(), 2);
}

#[tokio::test]
async fn create_appends_after_the_existing_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/doc1/values/Members!A2:ZZ:append"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "spreadsheetId": "doc1",
                "updates": update_response("Members!A4:B4", json!(["d", "Dana"]))
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[(2, "a", "Alice"), (3, "b", "Bob")])).await;
    let created = store.create(member("d", "Dana")).await.unwrap();

    assert_eq!(created.row(), 4);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn create_applies_server_side_transformations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/doc1/values/Members!A0:ZZ:append"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "spreadsheetId": "doc1",
                // The remote side normalized the name.
                "updates": update_response("Members!A2:B2", json!(["x", "Normalized"]))
            })),
        )
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[])).await;
    let created = store.create(member("x", "raw")).await.unwrap();

    assert_eq!(created.name, FieldValue::String("Normalized".to_string()));
    assert_eq!(
        store.rows()[0].name,
        FieldValue::String("Normalized".to_string())
    );
}

#[tokio::test]
async fn create_requires_an_unpersisted_row() {
    let server = MockServer::start().await;
    let mut store = store_against(&server, &member_table(&[])).await;

    let mut record = member("x", "n");
    record.set_row(2);
    let err = store.create(record).await.unwrap_err();
    assert!(matches!(err, GridError::RowPosition { got: 2, .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn create_requires_the_key_to_be_set() {
    let server = MockServer::start().await;
    let mut store = store_against(&server, &member_table(&[])).await;

    let err = store
        .create(Member {
            name: "n".into(),
            ..Member::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GridError::MissingKey(key) if key == "id"));
}

#[tokio::test]
async fn unconfirmed_append_leaves_the_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/doc1/values/Members!A0:ZZ:append"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "spreadsheetId": "doc1" })),
        )
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[])).await;
    let err = store.create(member("x", "n")).await.unwrap_err();

    assert!(matches!(err, GridError::AppendUnconfirmed));
    assert!(store.is_empty());
    assert!(store.find(&"x".into(), None).is_none());
}

// ===== update =====

#[tokio::test]
async fn update_overwrites_the_remote_row_and_the_stored_entry() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/doc1/values/Members!A2:ZZ"))
        .and(body_json(json!({ "values": [["x", "changed"]] })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(update_response("Members!A2:B2", json!(["x", "changed"]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[(2, "x", "original")])).await;

    let mut record = store.rows()[0].clone();
    record.name = "changed".into();
    let updated = store.update(record).await.unwrap();

    assert_eq!(updated.name, FieldValue::String("changed".to_string()));
    assert_eq!(
        store.rows()[0].name,
        FieldValue::String("changed".to_string())
    );
    assert_eq!(store.find(&"x".into(), None).unwrap().row(), 2);
}

#[tokio::test]
async fn update_requires_a_persisted_row() {
    let server = MockServer::start().await;
    let mut store = store_against(&server, &member_table(&[(2, "x", "n")])).await;

    let err = store.update(member("x", "n")).await.unwrap_err();
    assert!(matches!(err, GridError::RowPosition { got: 0, .. }));
}

#[tokio::test]
async fn update_requires_the_key_to_be_set() {
    let server = MockServer::start().await;
    let mut store = store_against(&server, &member_table(&[(2, "x", "n")])).await;

    let mut record = Member {
        name: "n".into(),
        ..Member::default()
    };
    record.set_row(2);
    let err = store.update(record).await.unwrap_err();
    assert!(matches!(err, GridError::MissingKey(_)));
}

#[tokio::test]
async fn update_rejects_a_row_the_store_does_not_hold() {
    // No mock mounted: the row check happens before any remote call.
    let server = MockServer::start().await;
    let mut store = store_against(&server, &member_table(&[(2, "x", "n")])).await;

    let mut record = member("y", "m");
    record.set_row(7);
    let err = store.update(record).await.unwrap_err();
    assert!(matches!(err, GridError::RowNotFound(7)));
}

#[tokio::test]
async fn update_resolves_list_position_through_the_row_map() {
    // Remote rows 2 and 5: list position and remote number diverge, so a
    // direct index would hit the wrong entry (or none at all).
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/doc1/values/Members!A5:ZZ"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(update_response("Members!A5:B5", json!(["b", "moved"]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[(2, "a", "Alice"), (5, "b", "Bob")])).await;

    let mut record = store.rows()[1].clone();
    record.name = "moved".into();
    store.update(record).await.unwrap();

    assert_eq!(store.rows()[0].name, FieldValue::String("Alice".to_string()));
    assert_eq!(store.rows()[1].name, FieldValue::String("moved".to_string()));
}

#[tokio::test]
async fn failed_update_leaves_the_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/doc1/values/Members!A2:ZZ"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[(2, "x", "original")])).await;

    let mut record = store.rows()[0].clone();
    record.name = "changed".into();
    let err = store.update(record).await.unwrap_err();

    assert!(matches!(err, GridError::Remote { status: 500, .. }));
    assert_eq!(
        store.rows()[0].name,
        FieldValue::String("original".to_string())
    );
}

// ===== save =====

#[tokio::test]
async fn save_dispatches_on_the_row_position() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/doc1/values/Members!A0:ZZ:append"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "spreadsheetId": "doc1",
                "updates": update_response("Members!A2:B2", json!(["x", "n"]))
            })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/doc1/values/Members!A2:ZZ"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(update_response("Members!A2:B2", json!(["x", "renamed"]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_against(&server, &member_table(&[])).await;

    let created = store.save(member("x", "n")).await.unwrap();
    assert_eq!(created.row(), 2);

    let mut renamed = created;
    renamed.name = "renamed".into();
    let updated = store.save(renamed).await.unwrap();
    assert_eq!(updated.name, FieldValue::String("renamed".to_string()));
    assert_eq!(store.len(), 1);
}
