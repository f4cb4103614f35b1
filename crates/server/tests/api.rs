use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState::new(engine, false))
}

/// A router over a database with no schema: every query fails with a 500.
async fn broken_app(expose_errors: bool) -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState::new(engine, expose_errors))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_trip(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/trips",
        Some(json!({ "name": name, "start_date": "2025-06-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_point(app: &Router, trip_id: &str, name: &str, order: i32) -> String {
    let (status, body) = send(
        app,
        "POST",
        &format!("/trips/{trip_id}/points"),
        Some(json!({
            "name": name,
            "order": order,
            "arrival_date": "2025-06-01",
            "departure_date": "2025-06-03",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn trip_total_follows_children() {
    let app = app().await;
    let trip_id = create_trip(&app, "Italy").await;
    let rome = create_point(&app, &trip_id, "Rome", 0).await;
    let florence = create_point(&app, &trip_id, "Florence", 1).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/points/{rome}/accommodations"),
        Some(json!({
            "name": "Hotel Roma",
            "kind": "hotel",
            "check_in": "2025-06-01T15:00:00Z",
            "check_out": "2025-06-03T10:00:00Z",
            "cost_minor": 12000,
            "status": "confirmed",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/trips/{trip_id}/expenses"),
        Some(json!({
            "description": "Dinner",
            "category": "restaurant",
            "amount_minor": 8000,
            "expense_date": "2025-06-02",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, route) = send(
        &app,
        "POST",
        "/routes",
        Some(json!({
            "from_point_id": rome,
            "to_point_id": florence,
            "name": "Frecciarossa",
            "transportation": "train",
            "cost_minor": 3000,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let route_id = route["id"].as_str().unwrap();

    let (_, trip) = send(&app, "GET", &format!("/trips/{trip_id}"), None).await;
    assert_eq!(trip["total_cost_minor"], 20000);

    let (status, _) = send(&app, "POST", &format!("/routes/{route_id}/select"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, trip) = send(&app, "GET", &format!("/trips/{trip_id}"), None).await;
    assert_eq!(trip["total_cost_minor"], 23000);

    let (status, summary) =
        send(&app, "GET", &format!("/trips/{trip_id}/expenses/summary"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_minor"], 8000);
    assert_eq!(summary["by_category"][0]["category"], "restaurant");
}

#[tokio::test]
async fn unknown_trip_is_404() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "GET",
        "/trips/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn self_loop_route_is_400() {
    let app = app().await;
    let trip_id = create_trip(&app, "Italy").await;
    let rome = create_point(&app, &trip_id, "Rome", 0).await;

    let (status, _) = send(
        &app,
        "POST",
        "/routes",
        Some(json!({
            "from_point_id": rome,
            "to_point_id": rome,
            "name": "Loop",
            "transportation": "walking",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_positive_expense_is_400() {
    let app = app().await;
    let trip_id = create_trip(&app, "Italy").await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/trips/{trip_id}/expenses"),
        Some(json!({
            "description": "Refund",
            "category": "other",
            "amount_minor": -500,
            "expense_date": "2025-06-02",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("detail").is_none());
}

#[tokio::test]
async fn default_trip_switches() {
    let app = app().await;
    let first = create_trip(&app, "First").await;
    let second = create_trip(&app, "Second").await;

    let (status, _) = send(&app, "GET", "/trips/default", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", &format!("/trips/{first}/default"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "POST", &format!("/trips/{second}/default"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, trips) = send(&app, "GET", "/trips", None).await;
    let trips = trips.as_array().unwrap();
    assert_eq!(trips[0]["id"], second.as_str());
    assert_eq!(trips.iter().filter(|t| t["is_default"] == true).count(), 1);
}

#[tokio::test]
async fn delete_reports_missing_rows() {
    let app = app().await;
    let trip_id = create_trip(&app, "Italy").await;
    let rome = create_point(&app, &trip_id, "Rome", 0).await;
    let florence = create_point(&app, &trip_id, "Florence", 1).await;

    let (status, route) = send(
        &app,
        "POST",
        "/routes",
        Some(json!({
            "from_point_id": rome,
            "to_point_id": florence,
            "name": "Frecciarossa",
            "transportation": "train",
            "cost_minor": 3000,
            "is_selected": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let route_id = route["id"].as_str().unwrap();
    let (_, trip) = send(&app, "GET", &format!("/trips/{trip_id}"), None).await;
    assert_eq!(trip["total_cost_minor"], 3000);

    let (status, _) = send(&app, "DELETE", &format!("/routes/{route_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/routes/{route_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, trip) = send(&app, "GET", &format!("/trips/{trip_id}"), None).await;
    assert_eq!(trip["total_cost_minor"], 0);

    let (status, _) = send(&app, "DELETE", &format!("/trips/{trip_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/trips/{trip_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn internal_errors_hide_detail_by_default() {
    let app = broken_app(false).await;
    let (status, body) = send(&app, "GET", "/trips", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
    assert!(body.get("detail").is_none());
}

#[tokio::test]
async fn internal_errors_carry_detail_when_exposed() {
    let app = broken_app(true).await;
    let (status, body) = send(&app, "GET", "/trips", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
    assert!(body["detail"].as_str().unwrap().contains("Database"));
}
