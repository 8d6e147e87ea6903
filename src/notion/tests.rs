//! Tests for the Notion client

use super::*;
use crate::auth::ApiToken;
use crate::coerce::{CoercedRecord, CoercionPolicy};
use crate::config::ClientSettings;
use crate::database_id::DatabaseId;
use crate::error::{ApiErrorCode, Error, FetchFailure};
use crate::loader::parse_records;
use crate::schema::ColumnType;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DB_ID: &str = "1d4a5e7f-e231-80b9-8df2-ddce1ea05ddf";

fn client_for(server: &MockServer) -> NotionClient {
    let settings = ClientSettings::new(ApiToken::new("secret_test").unwrap())
        .with_base_url(server.uri())
        .with_rate_limit(None);
    NotionClient::new(&settings).unwrap()
}

fn db_id() -> DatabaseId {
    DatabaseId::parse(DB_ID).unwrap()
}

#[test]
fn test_create_page_request_json() {
    let request = CreatePageRequest::new(&db_id(), CoercedRecord::new());
    assert_eq!(
        request.to_json(),
        json!({"parent": {"database_id": DB_ID}, "properties": {}})
    );
}

#[tokio::test]
async fn test_retrieve_database() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/databases/{DB_ID}")))
        .and(header("Authorization", "Bearer secret_test"))
        .and(header("Notion-Version", "2022-06-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "database",
            "id": DB_ID,
            "title": [{"plain_text": "Contacts"}],
            "properties": {
                "Name": {"id": "title", "type": "title", "title": {}},
                "Age": {"id": "abc", "type": "number", "number": {}}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let info = client.retrieve_database(&db_id()).await.unwrap();

    assert_eq!(info.title, "Contacts");
    assert_eq!(info.schema.get("Name"), Some(&ColumnType::Title));
    assert_eq!(info.schema.get("Age"), Some(&ColumnType::Number));
}

#[tokio::test]
async fn test_retrieve_database_not_shared() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/databases/{DB_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": format!("Could not find database with ID: {DB_ID}. Make sure the relevant pages and databases are shared with your integration.")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.retrieve_database(&db_id()).await.unwrap_err();

    assert_eq!(err.fetch_failure(), FetchFailure::NotFound);
    assert!(err.is_access_error());
}

#[tokio::test]
async fn test_retrieve_database_bad_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error",
            "status": 401,
            "code": "unauthorized",
            "message": "API token is invalid."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.retrieve_database(&db_id()).await.unwrap_err();

    assert_eq!(err.fetch_failure(), FetchFailure::PermissionDenied);
}

#[tokio::test]
async fn test_create_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .and(body_json(json!({
            "parent": {"database_id": DB_ID},
            "properties": {
                "Name": {"title": [{"type": "text", "text": {"content": "A"}}]}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "page",
            "id": "page-1",
            "url": "https://www.notion.so/A-page1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let schema = crate::schema::ColumnSchema::new().with_column("Name", ColumnType::Title);
    let records = parse_records(r#"{"properties":{"Name":"A"}}"#).unwrap();
    let coercion = crate::coerce::coerce(&records[0], &schema, CoercionPolicy::Strict).unwrap();

    let client = client_for(&mock_server);
    let page = client
        .create_page(&CreatePageRequest::new(&db_id(), coercion.record))
        .await
        .unwrap();

    assert_eq!(page.id, "page-1");
    assert_eq!(page.url.as_deref(), Some("https://www.notion.so/A-page1"));
}

#[tokio::test]
async fn test_create_page_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "object": "error",
            "status": 400,
            "code": "validation_error",
            "message": "Title is not a property that exists."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .create_page(&CreatePageRequest::new(&db_id(), CoercedRecord::new()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Api {
            status: 400,
            code: ApiErrorCode::ValidationError,
            ..
        }
    ));
    assert!(!err.is_access_error());
}
