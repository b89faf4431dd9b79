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
use tower::util::ServiceExt;

async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let storage = StorageConfig {
        path: std::env::temp_dir().join(format!("gamification-err-{}", uuid::Uuid::new_v4())),
        ..StorageConfig::default()
    };
    api::api_router(&AppState::new(db, storage)).await
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn level(number: i32) -> String {
    json!({
        "level_number": number,
        "xp_required": number * 100,
        "title": format!("Level {}", number),
        "rewards": ""
    })
    .to_string()
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = setup_app().await;

    for uri in ["/levels/abc", "/levels/-1", "/levels/1.5", "/levels/99999999999"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Invalid id format");
    }

    let (status, _) = send_raw(&app, "PUT", "/levels/abc", &level(1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_raw(&app, "DELETE", "/levels/abc", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/levels/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");

    let (status, _) = send_raw(&app, "PUT", "/levels/999", r#"{"title": "Ghost"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_raw(&app, "DELETE", "/levels/999", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = setup_app().await;

    let (status, created) = send_raw(&app, "POST", "/levels", &level(1)).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/levels/{}", created["id"]);

    let (status, _) = send_raw(&app, "DELETE", &uri, "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_raw(&app, "DELETE", &uri, "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_raw(&app, "PUT", &uri, r#"{"title": "Back"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_pagination_params() {
    let app = setup_app().await;

    for uri in ["/levels?page=0", "/levels?page=abc", "/levels?page=-2"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Invalid page number");
    }

    for uri in ["/levels?limit=0", "/levels?limit=ten"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Invalid limit number");
    }

    // Empty values fall back to the defaults
    let (status, body) = get(&app, "/levels?page=&limit=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["page_size"], 10);
}

#[tokio::test]
async fn test_huge_pagination_params_read_as_empty_pages() {
    let app = setup_app().await;
    let (status, _) = send_raw(&app, "POST", "/levels", &level(1)).await;
    assert_eq!(status, StatusCode::CREATED);

    for (uri, page) in [
        ("/levels?page=18446744073709551615&limit=10", u64::MAX),
        ("/levels?page=1000000000000000000&limit=10", 1_000_000_000_000_000_000),
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["data"].as_array().unwrap().len(), 0, "{}", uri);
        assert_eq!(body["pagination"]["page"], page);
        assert_eq!(body["pagination"]["total"], 1);
    }

    // A limit past the signed range still returns every row
    let (status, body) = get(&app, "/levels?limit=18446744073709551615").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total_pages"], 1);

    // Overflowing u64 altogether is rejected
    let (status, body) = get(&app, "/levels?page=18446744073709551616").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid page number");
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_request() {
    let app = setup_app().await;

    // Not JSON
    let (status, body) = send_raw(&app, "POST", "/levels", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Required field missing
    let (status, _) = send_raw(&app, "POST", "/levels", r#"{"title": "Incomplete"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Wrong type
    let (status, _) = send_raw(
        &app,
        "POST",
        "/levels",
        r#"{"level_number": "one", "xp_required": 0, "title": "", "rewards": ""}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unparsable update value
    let (_, created) = send_raw(&app, "POST", "/levels", &level(2)).await;
    let (status, _) = send_raw(
        &app,
        "PUT",
        &format!("/levels/{}", created["id"]),
        r#"{"xp_required": "lots"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dangling_foreign_key_is_internal_error() {
    let app = setup_app().await;

    let (status, body) = send_raw(
        &app,
        "POST",
        "/user-levels",
        r#"{"user_id": 42, "current_level_id": 7, "current_xp": 0, "last_leveled_up": "2024-01-01T00:00:00Z"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to create item")
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let app = setup_app().await;
    let (status, _) = get(&app, "/badges").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
