use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_database::firestore::{Direction, FirestoreClient};
use shared_database::value::string_value;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

#[tokio::test]
async fn add_returns_server_assigned_id() {
    let server = MockServer::start().await;
    let client = FirestoreClient::new(&TestConfig::with_mock_server(&server.uri()));

    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/test-project/databases/(default)/documents/appointments",
        ))
        .and(query_param("key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockStoreResponses::document(
            "appointments",
            "abc123",
            json!({}),
        )))
        .mount(&server)
        .await;

    let id = client
        .add(
            "appointments",
            json!({ "status": string_value("pending") }),
            Some("token"),
        )
        .await
        .unwrap();

    assert_eq!(id, "abc123");
}

#[tokio::test]
async fn add_with_id_uses_the_caller_chosen_id() {
    let server = MockServer::start().await;
    let client = FirestoreClient::new(&TestConfig::with_mock_server(&server.uri()));

    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/test-project/databases/(default)/documents/users",
        ))
        .and(query_param("documentId", "user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockStoreResponses::document(
            "users",
            "user-1",
            json!({}),
        )))
        .mount(&server)
        .await;

    let id = client
        .add_with_id("users", "user-1", json!({}), Some("token"))
        .await
        .unwrap();

    assert_eq!(id, "user-1");
}

#[tokio::test]
async fn add_failure_maps_to_store_error() {
    let server = MockServer::start().await;
    let client = FirestoreClient::new(&TestConfig::with_mock_server(&server.uri()));

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let result = client.add("appointments", json!({}), Some("token")).await;

    assert_matches!(result, Err(AppError::Store(_)));
}

#[tokio::test]
async fn get_missing_document_is_none() {
    let server = MockServer::start().await;
    let client = FirestoreClient::new(&TestConfig::with_mock_server(&server.uri()));

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let result = client.get("users", "missing", Some("token")).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn get_flattens_document_fields() {
    let server = MockServer::start().await;
    let client = FirestoreClient::new(&TestConfig::with_mock_server(&server.uri()));

    Mock::given(method("GET"))
        .and(path(
            "/v1/projects/test-project/databases/(default)/documents/users/user-1",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockStoreResponses::document(
            "users",
            "user-1",
            json!({ "role": { "stringValue": "patient" } }),
        )))
        .mount(&server)
        .await;

    let doc = client
        .get("users", "user-1", Some("token"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(doc["id"], "user-1");
    assert_eq!(doc["role"], "patient");
}

#[tokio::test]
async fn query_sends_filter_and_order_and_skips_rowless_results() {
    let server = MockServer::start().await;
    let client = FirestoreClient::new(&TestConfig::with_mock_server(&server.uri()));

    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/test-project/databases/(default)/documents:runQuery",
        ))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "appointments" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "patientId" },
                        "op": "EQUAL",
                        "value": { "stringValue": "p1" }
                    }
                },
                "orderBy": [{
                    "field": { "fieldPath": "start_time" },
                    "direction": "DESCENDING"
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockStoreResponses::query_result(vec![
                MockStoreResponses::document(
                    "appointments",
                    "a1",
                    json!({ "status": { "stringValue": "pending" } }),
                ),
                MockStoreResponses::document(
                    "appointments",
                    "a2",
                    json!({ "status": { "stringValue": "completed" } }),
                ),
            ]),
        ))
        .mount(&server)
        .await;

    let rows = client
        .query(
            "appointments",
            &[("patientId", string_value("p1"))],
            Some(("start_time", Direction::Descending)),
            Some("token"),
        )
        .await
        .unwrap();

    // The trailing read-time-only row is dropped.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], "a1");
    assert_eq!(rows[1]["id"], "a2");
}

#[tokio::test]
async fn query_error_propagates() {
    let server = MockServer::start().await;
    let client = FirestoreClient::new(&TestConfig::with_mock_server(&server.uri()));

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let result = client.query("appointments", &[], None, Some("token")).await;

    assert_matches!(result, Err(AppError::Store(_)));
}
