use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use gamification::api;
use gamification::config::StorageConfig;
use gamification::db;
use gamification::infrastructure::AppState;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let storage = StorageConfig {
        path: std::env::temp_dir().join(format!("gamification-it-{}", uuid::Uuid::new_v4())),
        ..StorageConfig::default()
    };
    AppState::new(db, storage)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn activity_type(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Complete a daily reading goal",
        "category": "social",
        "points_value": 10,
        "cooldown_period": 3600,
        "is_active": true
    })
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_state().await;
    let app = api::api_router(&state).await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gamification");
}

#[tokio::test]
async fn test_activity_type_lifecycle() {
    let state = setup_test_state().await;
    let app = api::api_router(&state).await;

    // Create
    let (status, created) = send(&app, "POST", "/activity-types", Some(activity_type("Lend"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Lend");
    assert_eq!(created["points_value"], 10);
    assert!(created["deleted_at"].is_null());
    assert_eq!(created["created_at"], created["updated_at"]);

    // Read
    let (status, fetched) = send(&app, "GET", &format!("/activity-types/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Lend");

    // Partial update: "" and missing fields keep their value, strings coerce
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/activity-types/{}", id),
        Some(json!({ "name": "", "points_value": "25", "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Lend");
    assert_eq!(updated["category"], "social");
    assert_eq!(updated["points_value"], 25);
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["created_at"], created["created_at"]);

    // Delete
    let (status, body) = send(&app, "DELETE", &format!("/activity-types/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted successfully");

    // Soft-deleted rows are invisible everywhere
    let (status, body) = send(&app, "GET", &format!("/activity-types/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");

    let (_, list) = send(&app, "GET", "/activity-types", None).await;
    assert_eq!(list["pagination"]["total"], 0);
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_pagination() {
    let state = setup_test_state().await;
    let app = api::api_router(&state).await;

    for i in 1..=12 {
        let (status, _) = send(
            &app,
            "POST",
            "/activity-types",
            Some(activity_type(&format!("Activity {}", i))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Defaults: page 1, 10 per page
    let (status, first) = send(&app, "GET", "/activity-types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"].as_array().unwrap().len(), 10);
    assert_eq!(first["data"][0]["name"], "Activity 1");
    assert_eq!(
        first["pagination"],
        json!({ "total": 12, "page": 1, "page_size": 10, "total_pages": 2 })
    );

    // Partial last page
    let (_, last) = send(&app, "GET", "/activity-types?page=3&limit=5", None).await;
    assert_eq!(last["data"].as_array().unwrap().len(), 2);
    assert_eq!(last["data"][0]["name"], "Activity 11");
    assert_eq!(last["pagination"]["total_pages"], 3);

    // Past the end
    let (status, empty) = send(&app, "GET", "/activity-types?page=9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["data"].as_array().unwrap().len(), 0);
    assert_eq!(empty["pagination"]["page"], 9);
    assert_eq!(empty["pagination"]["total"], 12);

    // `/all` ignores paging
    let (status, all) = send(&app, "GET", "/activity-types/all?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["data"].as_array().unwrap().len(), 12);
    assert_eq!(all["pagination"]["total_pages"], 1);
}

#[tokio::test]
async fn test_every_catalog_module_is_mounted() {
    let state = setup_test_state().await;
    let app = api::api_router(&state).await;

    let payloads = [
        ("/activity-types", activity_type("Review")),
        (
            "/point-types",
            json!({ "name": "XP", "description": "Experience", "icon": "star" }),
        ),
        (
            "/achievements",
            json!({
                "name": "Bookworm",
                "description": "Read 10 books",
                "category": "reading",
                "difficulty_level": 2,
                "is_hidden": false,
                "is_active": true
            }),
        ),
        (
            "/levels",
            json!({ "level_number": 1, "xp_required": 0, "title": "Novice", "rewards": "" }),
        ),
        (
            "/challenges",
            json!({
                "name": "Summer reading",
                "description": "Read 5 books this summer",
                "start_date": "2024-06-01T00:00:00Z",
                "end_date": "2024-08-31T23:59:59Z",
                "reward_type": "points",
                "reward_value": "500",
                "is_active": true
            }),
        ),
        (
            "/leaderboards",
            json!({
                "name": "Monthly readers",
                "type": "points",
                "period": "monthly",
                "reset_frequency": "monthly",
                "is_active": true
            }),
        ),
    ];

    for (path, payload) in payloads {
        let (status, created) = send(&app, "POST", path, Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "{}: {}", path, created);

        let id = created["id"].as_i64().unwrap();
        let (status, _) = send(&app, "GET", &format!("{}/{}", path, id), None).await;
        assert_eq!(status, StatusCode::OK, "{}", path);

        let (_, list) = send(&app, "GET", path, None).await;
        assert_eq!(list["pagination"]["total"], 1, "{}", path);
    }
}

#[tokio::test]
async fn test_challenge_dates_are_normalized() {
    let state = setup_test_state().await;
    let app = api::api_router(&state).await;

    let (_, created) = send(
        &app,
        "POST",
        "/challenges",
        Some(json!({
            "name": "Winter",
            "description": "",
            "start_date": "2024-12-01T00:00:00+01:00",
            "end_date": "2025-02-28T00:00:00Z",
            "reward_type": "badge",
            "reward_value": "snowflake",
            "is_active": true
        })),
    )
    .await;
    assert_eq!(created["start_date"], "2024-11-30T23:00:00+00:00");

    let id = created["id"].as_i64().unwrap();
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/challenges/{}", id),
        Some(json!({ "end_date": "2025-03-01T12:00:00Z", "start_date": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["end_date"], "2025-03-01T12:00:00+00:00");
    assert_eq!(updated["start_date"], created["start_date"]);
}

#[tokio::test]
async fn test_writes_emit_events() {
    let state = setup_test_state().await;
    let mut events = state.emitter.subscribe();
    let app = api::api_router(&state).await;

    let (_, created) = send(
        &app,
        "POST",
        "/point-types",
        Some(json!({ "name": "Coins", "description": "", "icon": "coin" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    send(&app, "PUT", &format!("/point-types/{}", id), Some(json!({ "icon": "gold" }))).await;
    send(&app, "DELETE", &format!("/point-types/{}", id), None).await;

    let create = events.recv().await.unwrap();
    assert_eq!(create.name, "pointtypes.create");
    assert_eq!(create.payload["name"], "Coins");

    let update = events.recv().await.unwrap();
    assert_eq!(update.name, "pointtypes.update");
    assert_eq!(update.payload["icon"], "gold");

    let delete = events.recv().await.unwrap();
    assert_eq!(delete.name, "pointtypes.delete");
    assert_eq!(delete.payload["id"], id);

    // Reads don't emit
    send(&app, "GET", "/point-types", None).await;
    assert!(events.try_recv().is_err());
}
