use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_management::config::EnvironmentConfig;
use fleet_management::database::DatabaseConnection;
use fleet_management::routes::create_router;
use fleet_management::state::AppState;
use fleet_management::utils::validation::MAX_IMAGE_BYTES;

fn create_test_app() -> Router {
    let db = DatabaseConnection::in_memory("fleet-management-test");
    create_router(AppState::new(db, EnvironmentConfig::default()))
}

struct TestResponse {
    status: StatusCode,
    headers: axum::http::HeaderMap,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse { status, headers, body }
}

fn vehicle(make: &str, plate: &str, status: &str) -> Value {
    json!({
        "type": "Truck",
        "make": make,
        "model": "FH16",
        "location": "Lyon",
        "status": status,
        "mileage": 1200,
        "registrationDate": "2024-01-10",
        "purchaseDate": "2023-12-01",
        "licenseExpiryDate": "2027-01-10",
        "licensePlate": plate
    })
}

fn driver(first: &str, last: &str, status: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        "phone": "0600000000",
        "address": "1 rue de Lyon",
        "licenseNumber": "DL-001",
        "licenseType": "C",
        "licenseExpiryDate": "2027-05-01",
        "status": status,
        "emergencyContact": "Contact",
        "emergencyPhone": "0611111111"
    })
}

fn company(name: &str) -> Value {
    json!({
        "name": name,
        "licenseNumber": "LIC-42",
        "address": "12 avenue Foch",
        "renewalDate": "2026-01-01"
    })
}

fn data_uri(decoded_len: usize) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(vec![0u8; decoded_len]))
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_create_vehicle_sets_matching_timestamps() {
    let app = create_test_app();
    let mut payload = vehicle("Volvo", "AB-123-CD", "active");
    payload["_id"] = json!("not-an-id");
    payload["createdAt"] = json!("1999-01-01T00:00:00.000Z");

    let response = send(&app, Method::POST, "/api/vehicles", Some(payload)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["_id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert_eq!(response.body["createdAt"], response.body["updatedAt"]);
    assert_ne!(response.body["createdAt"], "1999-01-01T00:00:00.000Z");

    let fetched = send(&app, Method::GET, &format!("/api/vehicles/{}", id), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, response.body);
}

#[tokio::test]
async fn test_partial_vehicle_update_is_rejected() {
    let app = create_test_app();
    let created = send(&app, Method::POST, "/api/vehicles", Some(vehicle("Volvo", "AB-123-CD", "active"))).await;
    let uri = format!("/api/vehicles/{}", created.body["_id"].as_str().unwrap());

    let response = send(&app, Method::PUT, &uri, Some(json!({ "mileage": 500 }))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");

    // el documento guardado no cambia
    let fetched = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched.body["mileage"], 1200.0);
}

#[tokio::test]
async fn test_full_vehicle_update_preserves_creation_time() {
    let app = create_test_app();
    let created = send(&app, Method::POST, "/api/vehicles", Some(vehicle("Volvo", "AB-123-CD", "active"))).await;
    let uri = format!("/api/vehicles/{}", created.body["_id"].as_str().unwrap());

    let mut replacement = vehicle("Scania", "AB-123-CD", "maintenance");
    replacement["mileage"] = json!(500);
    let response = send(&app, Method::PUT, &uri, Some(replacement)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["_id"], created.body["_id"]);
    assert_eq!(response.body["createdAt"], created.body["createdAt"]);
    assert_eq!(response.body["make"], "Scania");
    assert_eq!(response.body["mileage"], 500.0);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = create_test_app();

    for method in [Method::GET, Method::DELETE] {
        let response = send(&app, method, "/api/vehicles/not-a-valid-id", None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    let response = send(&app, Method::GET, "/api/drivers/12345", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = create_test_app();
    let created = send(&app, Method::POST, "/api/vehicles", Some(vehicle("Volvo", "AB-123-CD", "active"))).await;
    let uri = format!("/api/vehicles/{}", created.body["_id"].as_str().unwrap());

    let deleted = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);

    let fetched = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["code"], "NOT_FOUND");

    let again = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_size_boundary() {
    let app = create_test_app();

    let mut at_limit = vehicle("Volvo", "AB-123-CD", "active");
    at_limit["image"] = json!(data_uri(MAX_IMAGE_BYTES));
    let response = send(&app, Method::POST, "/api/vehicles", Some(at_limit)).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let mut over_limit = vehicle("Volvo", "EF-456-GH", "active");
    over_limit["image"] = json!(data_uri(MAX_IMAGE_BYTES + 1));
    let response = send(&app, Method::POST, "/api/vehicles", Some(over_limit)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["image"].is_array());
}

#[tokio::test]
async fn test_vehicle_update_image_size_boundary() {
    let app = create_test_app();
    let created = send(&app, Method::POST, "/api/vehicles", Some(vehicle("Volvo", "AB-123-CD", "active"))).await;
    let uri = format!("/api/vehicles/{}", created.body["_id"].as_str().unwrap());

    let mut over_limit = vehicle("Volvo", "AB-123-CD", "active");
    over_limit["image"] = json!(data_uri(MAX_IMAGE_BYTES + 1));
    let response = send(&app, Method::PUT, &uri, Some(over_limit)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["image"].is_array());

    let mut at_limit = vehicle("Volvo", "AB-123-CD", "active");
    at_limit["image"] = json!(data_uri(MAX_IMAGE_BYTES));
    let response = send(&app, Method::PUT, &uri, Some(at_limit)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["image"], json!(data_uri(MAX_IMAGE_BYTES)));
}

#[tokio::test]
async fn test_driver_image_size_boundary() {
    let app = create_test_app();

    let mut over_limit = driver("Jane", "Doe", "active");
    over_limit["image"] = json!(data_uri(MAX_IMAGE_BYTES + 1));
    let response = send(&app, Method::POST, "/api/drivers", Some(over_limit)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["image"].is_array());

    let mut at_limit = driver("Jane", "Doe", "active");
    at_limit["image"] = json!(data_uri(MAX_IMAGE_BYTES));
    let created = send(&app, Method::POST, "/api/drivers", Some(at_limit.clone())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let uri = format!("/api/drivers/{}", created.body["_id"].as_str().unwrap());

    let mut over_limit = driver("Jane", "Doe", "active");
    over_limit["image"] = json!(data_uri(MAX_IMAGE_BYTES + 1));
    let response = send(&app, Method::PUT, &uri, Some(over_limit)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["image"].is_array());

    let response = send(&app, Method::PUT, &uri, Some(at_limit)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["image"], json!(data_uri(MAX_IMAGE_BYTES)));
}

#[tokio::test]
async fn test_company_logo_size_boundary() {
    let app = create_test_app();

    let mut over_limit = company("Acme");
    over_limit["logo"] = json!(data_uri(MAX_IMAGE_BYTES + 1));
    let response = send(&app, Method::POST, "/api/company", Some(over_limit.clone())).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["logo"].is_array());

    let mut at_limit = company("Acme");
    at_limit["logo"] = json!(data_uri(MAX_IMAGE_BYTES));
    let response = send(&app, Method::POST, "/api/company", Some(at_limit.clone())).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = send(&app, Method::PUT, "/api/company", Some(over_limit)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(&app, Method::PUT, "/api/company", Some(at_limit)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["logo"], json!(data_uri(MAX_IMAGE_BYTES)));
}

#[tokio::test]
async fn test_created_driver_reads_back_unchanged() {
    let app = create_test_app();
    let mut payload = driver("Jane", "Doe", "on_leave");
    payload["image"] = json!(data_uri(64));

    let created = send(&app, Method::POST, "/api/drivers", Some(payload.clone())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let uri = format!("/api/drivers/{}", created.body["_id"].as_str().unwrap());

    let fetched = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"], created.body);

    for (field, value) in payload.as_object().unwrap() {
        assert_eq!(&fetched.body["data"][field], value, "campo {}", field);
    }
}

#[tokio::test]
async fn test_records_created_back_to_back_list_newest_first() {
    let app = create_test_app();
    for first in ["First", "Second", "Third"] {
        let response = send(&app, Method::POST, "/api/drivers", Some(driver(first, "Doe", "active"))).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = send(&app, Method::GET, "/api/drivers", None).await;
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_invalid_enum_value_is_bad_request() {
    let app = create_test_app();
    let mut payload = vehicle("Volvo", "AB-123-CD", "active");
    payload["type"] = json!("Motorbike");

    let response = send(&app, Method::POST, "/api/vehicles", Some(payload)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(&app, Method::GET, "/api/vehicles?status=retired", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vehicle_listing_filters_and_paginates() {
    let app = create_test_app();
    for (make, plate, status) in [
        ("Volvo", "AA-001-AA", "active"),
        ("Volvo", "AA-002-AA", "maintenance"),
        ("Scania", "AA-003-AA", "active"),
        ("Volvo", "AA-004-AA", "active"),
    ] {
        send(&app, Method::POST, "/api/vehicles", Some(vehicle(make, plate, status))).await;
    }

    let response = send(&app, Method::GET, "/api/vehicles?status=active&search=volvo", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["x-total-count"], "2");
    let plates: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["licensePlate"].as_str().unwrap())
        .collect();
    assert!(plates.contains(&"AA-001-AA"));
    assert!(plates.contains(&"AA-004-AA"));

    let page = send(&app, Method::GET, "/api/vehicles?status=all&page=2&limit=3", None).await;
    assert_eq!(page.headers["x-total-count"], "4");
    assert_eq!(page.body.as_array().unwrap().len(), 1);

    let stats = send(&app, Method::GET, "/api/vehicles/stats", None).await;
    assert_eq!(stats.body["total"], 4);
    assert_eq!(stats.body["active"], 3);
    assert_eq!(stats.body["byType"]["Truck"], 4);
}

#[tokio::test]
async fn test_driver_search_and_status_combine() {
    let app = create_test_app();
    for (first, last, status) in [
        ("Jane", "Smith", "active"),
        ("Jane", "Doe", "on_leave"),
        ("Paul", "Smith", "active"),
    ] {
        let response = send(&app, Method::POST, "/api/drivers", Some(driver(first, last, status))).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = send(&app, Method::GET, "/api/drivers?status=active&search=smith", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let drivers = response.body.as_array().unwrap();
    assert_eq!(drivers.len(), 2);
    assert!(drivers.iter().all(|d| d["status"] == "active"));

    let response = send(&app, Method::GET, "/api/drivers?search=JANE&view=summary", None).await;
    let drivers = response.body.as_array().unwrap();
    assert_eq!(drivers.len(), 2);
    let doe = drivers.iter().find(|d| d["name"] == "Jane Doe").unwrap();
    assert_eq!(doe["status"], "inactive");
}

#[tokio::test]
async fn test_driver_single_routes_use_envelope() {
    let app = create_test_app();
    let created = send(&app, Method::POST, "/api/drivers", Some(driver("Jane", "Doe", "on_leave"))).await;
    let uri = format!("/api/drivers/{}", created.body["_id"].as_str().unwrap());

    let full = send(&app, Method::GET, &uri, None).await;
    assert_eq!(full.status, StatusCode::OK);
    assert_eq!(full.body["success"], true);
    assert_eq!(full.body["data"]["firstName"], "Jane");
    assert_eq!(full.body["data"]["status"], "on_leave");

    let summary = send(&app, Method::GET, &format!("{}?view=summary", uri), None).await;
    assert_eq!(summary.body["data"]["name"], "Jane Doe");
    assert_eq!(summary.body["data"]["status"], "inactive");

    let deleted = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(deleted.body["success"], true);

    let missing = send(&app, Method::GET, &uri, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["success"], false);
}

#[tokio::test]
async fn test_company_is_a_singleton() {
    let app = create_test_app();

    let missing = send(&app, Method::GET, "/api/company", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let first = send(&app, Method::POST, "/api/company", Some(company("Acme"))).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["data"]["createdAt"], first.body["data"]["updatedAt"]);

    let second = send(&app, Method::POST, "/api/company", Some(company("Acme Fleet"))).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["data"]["_id"], first.body["data"]["_id"]);
    assert_eq!(second.body["data"]["createdAt"], first.body["data"]["createdAt"]);

    let stored = send(&app, Method::GET, "/api/company", None).await;
    assert_eq!(stored.status, StatusCode::OK);
    assert_eq!(stored.body["data"]["name"], "Acme Fleet");

    let put = send(&app, Method::PUT, "/api/company", Some(company("Acme Logistics"))).await;
    assert_eq!(put.status, StatusCode::OK);
    assert_eq!(put.body["data"]["_id"], first.body["data"]["_id"]);
}

#[tokio::test]
async fn test_company_requires_mandatory_fields() {
    let app = create_test_app();
    let response = send(&app, Method::POST, "/api/company", Some(json!({ "name": "Acme" }))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_unsupported_method_returns_allow_header() {
    let app = create_test_app();

    let response = send(&app, Method::DELETE, "/api/company", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers[header::ALLOW], "GET, POST, PUT");
    assert_eq!(response.body["code"], "METHOD_NOT_ALLOWED");

    let response = send(&app, Method::PATCH, "/api/vehicles/65f1c0a2b3d4e5f6a7b8c9d0", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers[header::ALLOW], "GET, PUT, DELETE");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/drivers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();
    let response = send(&app, Method::GET, "/api/unknown", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_database_diagnostics() {
    let app = create_test_app();
    let response = send(&app, Method::GET, "/api/test-db", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["database"], "fleet-management-test");
    assert_eq!(response.body["testResults"]["insert"], true);
    assert_eq!(response.body["testResults"]["cleanup"], true);
}
