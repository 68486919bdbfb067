//! HTTP surface tests: the full router over the in-memory store, driven with
//! `tower::ServiceExt::oneshot`.

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use transit_parking::application::{BookingService, ProvisioningService, TransportationService};
use transit_parking::domain::RepositoryProvider;
use transit_parking::interfaces::http::modules::health::HealthState;
use transit_parking::{create_api_router, ApiContext, InMemoryStore};

async fn app() -> Router {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());
    let transportation = Arc::new(TransportationService::new(repos.clone()));
    transportation.seed_default_types().await.unwrap();

    create_api_router(ApiContext {
        bookings: Arc::new(BookingService::new(repos.clone())),
        transportation,
        provisioning: Arc::new(ProvisioningService::new(repos)),
        health: HealthState::new(None),
        prometheus: PrometheusBuilder::new().build_recorder().handle(),
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

/// Location with `spots` standard spots; returns the location ID
async fn provision(app: &Router, spots: usize) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/locations",
        None,
        Some(json!({
            "name": "Riverside P+R",
            "address": "1 Station Road",
            "latitude": 51.5,
            "longitude": -0.12,
            "hourly_rate": "5.00",
            "has_transit_access": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["id"].as_i64().unwrap();

    for n in 1..=spots {
        let (status, body) = send(
            app,
            "POST",
            &format!("/api/v1/locations/{id}/spots"),
            None,
            Some(json!({"spot_number": format!("S-{n}"), "spot_type": "standard"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }
    id
}

fn booking_body(location_id: i64, start: &str, end: &str) -> Value {
    json!({
        "vehicle_id": 1,
        "location_id": location_id,
        "start_time": start,
        "end_time": end
    })
}

#[tokio::test]
async fn health_reports_memory_backend() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/bookings"].is_object());
}

#[tokio::test]
async fn booking_round_trip() {
    let app = app().await;
    let location_id = provision(&app, 2).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some("7"),
        Some(booking_body(
            location_id,
            "2030-05-01T09:00:00Z",
            "2030-05-01T11:30:00Z",
        )),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(decimal(&body["data"]["total_amount"]), Decimal::new(1650, 2));
    let booking_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/api/v1/bookings", Some("7"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "GET",
        &format!(
            "/api/v1/locations/{location_id}/availability?start_time=2030-05-01T10:00:00Z&end_time=2030-05-01T10:30:00Z"
        ),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["available_count"], 1);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        Some("7"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "canceled");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        Some("7"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_user_header_is_401() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/v1/bookings", Some("abc"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_location_is_409() {
    let app = app().await;
    let location_id = provision(&app, 1).await;
    let body = booking_body(location_id, "2030-05-01T09:00:00Z", "2030-05-01T10:00:00Z");

    let (status, _) = send(&app, "POST", "/api/v1/bookings", Some("1"), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/v1/bookings", Some("2"), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("No spot available"));
}

#[tokio::test]
async fn bad_interval_is_400() {
    let app = app().await;
    let location_id = provision(&app, 1).await;

    let inverted = booking_body(location_id, "2030-05-01T11:00:00Z", "2030-05-01T10:00:00Z");
    let (status, _) = send(&app, "POST", "/api/v1/bookings", Some("1"), Some(inverted)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let garbled = booking_body(location_id, "tomorrow morning", "2030-05-01T10:00:00Z");
    let (status, _) = send(&app, "POST", "/api/v1/bookings", Some("1"), Some(garbled)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_users_booking_is_403_on_cancel() {
    let app = app().await;
    let location_id = provision(&app, 1).await;
    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some("1"),
        Some(booking_body(
            location_id,
            "2030-05-01T09:00:00Z",
            "2030-05-01T10:00:00Z",
        )),
    )
    .await;
    let booking_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        Some("2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn fare_preview_rounds_hours_up() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/fares/preview?start_time=2030-05-01T09:00:00Z&end_time=2030-05-01T11:30:00Z&hourly_rate=5.00",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["billable_hours"], 3);
    assert_eq!(decimal(&body["data"]["booking_fee"]), Decimal::new(150, 2));
    assert_eq!(decimal(&body["data"]["total"]), Decimal::new(1650, 2));

    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/fares/preview?start_time=2030-05-01T09:00:00Z&end_time=2030-05-01T11:30:00Z&hourly_rate=-1",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_location_body_is_422() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/locations",
        None,
        Some(json!({
            "name": "",
            "address": "1 Station Road",
            "latitude": 123.0,
            "longitude": 0.0,
            "hourly_rate": "5.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("latitude"));
    assert!(error.contains("name"));
}

#[tokio::test]
async fn unknown_location_is_404() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/locations/42", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn vehicles_are_scoped_to_their_owner() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/vehicles",
        Some("3"),
        Some(json!({"license_plate": "KA-01-1234", "make": "Skoda"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let vehicle_id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = send(&app, "GET", "/api/v1/vehicles", Some("4"), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/vehicles/{vehicle_id}"),
        Some("4"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/vehicles/{vehicle_id}"),
        Some("3"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn ride_attaches_to_own_parking_booking() {
    let app = app().await;
    let location_id = provision(&app, 1).await;
    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/bookings",
        Some("5"),
        Some(booking_body(
            location_id,
            "2030-05-01T09:00:00Z",
            "2030-05-01T10:00:00Z",
        )),
    )
    .await;
    let booking_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", "/api/v1/transportation/types", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let types = body["data"].as_array().unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0]["name"], "Cab");
    let cab_id = types[0]["id"].as_i64().unwrap();

    let ride = |parking_booking_id: i64| {
        json!({
            "transportation_type_id": cab_id,
            "parking_booking_id": parking_booking_id,
            "pickup_location": "Riverside P+R",
            "dropoff_location": "Campus",
            "pickup_time": "2030-05-01T09:10:00Z",
            "is_shared": false,
            "distance_km": "4"
        })
    };

    // someone else's parking booking
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/transportation/bookings",
        Some("6"),
        Some(ride(booking_id)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/transportation/bookings",
        Some("5"),
        Some(ride(booking_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "confirmed");
    // 3.50 base + 4 km at 1.50
    assert_eq!(decimal(&body["data"]["amount"]), Decimal::new(950, 2));
    let ride_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/transportation/bookings/{ride_id}/cancel"),
        Some("5"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "canceled");
}
