use super::*;
use crate::request::{MockHttpClient, ReqwestHttpClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "http://api.test";

fn client() -> ApiClient<MockHttpClient> {
    ApiClient::new("http://api.test/", MockHttpClient::new())
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =========================================================
// URL building
// =========================================================

#[test]
fn url_encodes_query_like_a_browser_form() {
    let client = client();
    assert_eq!(client.base_url(), BASE);
    assert_eq!(client.url("/api/buildings", &[]), "http://api.test/api/buildings");
    assert_eq!(
        client.url(
            "/api/buildings",
            &params(&[("page", "1"), ("limit", "10"), ("search", "Thu Duc & co")])
        ),
        "http://api.test/api/buildings?page=1&limit=10&search=Thu+Duc+%26+co"
    );
}

// =========================================================
// Response normalisation (mock transport)
// =========================================================

#[tokio::test]
async fn success_body_is_returned_as_is() {
    let client = client();
    let url = format!("{}/api/locations?page=1", BASE);
    client
        .transport()
        .mock_response(HttpMethod::Get, &url, 200, json!({"data": [], "total": 0}));

    let body = client.get("/api/locations", &params(&[("page", "1")])).await.unwrap();
    assert_eq!(body, json!({"data": [], "total": 0}));

    let sent = client.transport().last_request().unwrap();
    assert_eq!(sent.header("Accept"), Some("application/json"));
    assert_eq!(sent.header("Content-Type"), None);
    assert!(sent.body.is_none());
}

#[tokio::test]
async fn writes_carry_a_json_body() {
    let client = client();
    let url = format!("{}/api/rooms/4", BASE);
    client
        .transport()
        .mock_response(HttpMethod::Put, &url, 200, json!({"id": 4}));

    client.put("/api/rooms/4", &json!({"status": "occupied"})).await.unwrap();

    let sent = client.transport().last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Put);
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
    assert_eq!(sent.body.as_deref(), Some(r#"{"status":"occupied"}"#));
}

#[tokio::test]
async fn error_message_comes_from_body() {
    let client = client();
    let url = format!("{}/api/buildings/9", BASE);
    client.transport().mock_response(
        HttpMethod::Delete,
        &url,
        404,
        json!({"message": "Building not found"}),
    );

    let err = client.delete("/api/buildings/9").await.unwrap_err();
    assert_eq!(err, HttpError::new(404, "Building not found"));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn error_field_is_used_when_message_is_absent() {
    let client = client();
    let url = format!("{}/api/accounts", BASE);
    // Queued replies are served in order, so both go in before the first call.
    client
        .transport()
        .mock_response(HttpMethod::Post, &url, 409, json!({"error": "Email already exists"}));
    client.transport().mock_response(
        HttpMethod::Post,
        &url,
        422,
        json!({"error": {"message": "Invalid role"}}),
    );

    let err = client.post("/api/accounts", &json!({})).await.unwrap_err();
    assert_eq!(err, HttpError::new(409, "Email already exists"));

    let err = client.post("/api/accounts", &json!({})).await.unwrap_err();
    assert_eq!(err, HttpError::new(422, "Invalid role"));
}

#[tokio::test]
async fn unreadable_failure_body_falls_back_to_status() {
    let client = client();
    let url = format!("{}/api/assets", BASE);
    client
        .transport()
        .mock_raw(HttpMethod::Get, &url, 502, "<html>Bad Gateway</html>");

    let err = client.get("/api/assets", &[]).await.unwrap_err();
    assert_eq!(err.status, 502);
    assert_eq!(err.message, "Request failed with status 502");
}

#[tokio::test]
async fn transport_failure_is_status_zero() {
    let client = client();
    let url = format!("{}/api/universities", BASE);
    client.transport().mock_network_failure(HttpMethod::Get, &url);

    let err = client.get("/api/universities", &[]).await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.message, "network error");
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let client = client();
    let url = format!("{}/api/rooms/1", BASE);
    client.transport().mock_raw(HttpMethod::Delete, &url, 204, "");
    assert_eq!(client.delete("/api/rooms/1").await.unwrap(), Value::Null);
}

#[tokio::test]
async fn garbage_success_body_is_an_error() {
    let client = client();
    let url = format!("{}/api/rooms/1", BASE);
    client.transport().mock_raw(HttpMethod::Get, &url, 200, "OK!");
    let err = client.get("/api/rooms/1", &[]).await.unwrap_err();
    assert_eq!(err, HttpError::new(200, INVALID_JSON_MESSAGE));
}

#[tokio::test]
async fn one_attempt_per_call() {
    let client = client();
    let url = format!("{}/api/room-types", BASE);
    client
        .transport()
        .mock_response(HttpMethod::Get, &url, 500, json!({"message": "boom"}));
    let _ = client.get("/api/room-types", &[]).await;
    assert_eq!(client.transport().request_count(), 1);
}

// =========================================================
// Real HTTP round-trips (reqwest + wiremock)
// =========================================================

#[tokio::test]
async fn round_trips_against_http_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/buildings"))
        .and(query_param("page", "2"))
        .and(query_param("search", "fpt"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "name": "FScape FPT"}],
            "total": 11,
            "page": 2,
            "totalPages": 2
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/buildings/1"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "is_active": false})))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/buildings/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri(), ReqwestHttpClient::new());

    let page = client
        .get("/api/buildings", &params(&[("page", "2"), ("search", "fpt")]))
        .await
        .unwrap();
    assert_eq!(page["totalPages"], 2);

    let updated = client
        .put("/api/buildings/1", &json!({"is_active": false}))
        .await
        .unwrap();
    assert_eq!(updated["is_active"], false);

    let err = client.delete("/api/buildings/77").await.unwrap_err();
    assert_eq!(err, HttpError::new(404, "Not found"));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = ApiClient::new("http://127.0.0.1:1", ReqwestHttpClient::new());
    let err = client.get("/api/rooms", &[]).await.unwrap_err();
    assert_eq!(err.status, 0);
}
