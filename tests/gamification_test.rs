use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use gamification::api;
use gamification::config::StorageConfig;
use gamification::db;
use gamification::infrastructure::AppState;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{Value, json};
use tower::util::ServiceExt;

const BOUNDARY: &str = "gamification-test-boundary";

// Helper to create a test app state with its own storage directory
async fn setup_test_state(max_upload_bytes: usize) -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let storage = StorageConfig {
        path: std::env::temp_dir().join(format!("gamification-gt-{}", uuid::Uuid::new_v4())),
        base_url: "/storage".to_string(),
        max_upload_bytes,
    };
    AppState::new(db, storage)
}

// Helper to create a test user
async fn create_test_user(db: &DatabaseConnection, username: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let user = gamification::models::user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(Some(format!("{}@example.com", username))),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    user.insert(db).await.expect("Failed to create user").id
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
    read(app.clone().oneshot(req).await.unwrap()).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn upload(app: &Router, uri: &str, field: &str, filename: &str, content: &[u8]) -> (StatusCode, Value) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let req = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    read(app.clone().oneshot(req).await.unwrap()).await
}

async fn create(app: &Router, path: &str, payload: Value) -> i64 {
    let (status, body) = send(app, "POST", path, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{}: {}", path, body);
    body["id"].as_i64().unwrap()
}

fn achievement(name: &str) -> Value {
    json!({
        "name": name,
        "description": "",
        "category": "reading",
        "difficulty_level": 1,
        "is_hidden": false,
        "is_active": true
    })
}

fn activity_type(name: &str) -> Value {
    json!({
        "name": name,
        "description": "",
        "category": "reading",
        "points_value": 5,
        "cooldown_period": 0,
        "is_active": true
    })
}

#[tokio::test]
async fn test_user_activity_embeds_relations() {
    let state = setup_test_state(1024).await;
    let user_id = create_test_user(&state.db, "alice").await;
    let app = api::api_router(&state).await;

    let type_id = create(&app, "/activity-types", activity_type("Finish a book")).await;
    let (status, created) = send(
        &app,
        "POST",
        "/user-activities",
        Some(json!({
            "user_id": user_id,
            "activity_type_id": type_id,
            "points_earned": 5,
            "metadata": "{\"book\": 12}",
            "completed_at": "2024-05-01T10:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user"]["username"], "alice");
    assert_eq!(created["activity_type"]["name"], "Finish a book");

    // List items carry ids only
    let (_, list) = send(&app, "GET", "/user-activities", None).await;
    let item = &list["data"][0];
    assert_eq!(item["user_id"], user_id);
    assert!(item.get("user").is_none());
    assert!(item.get("activity_type").is_none());

    // A soft-deleted catalog row is no longer embedded
    send(&app, "DELETE", &format!("/activity-types/{}", type_id), None).await;
    let (status, fetched) = send(&app, "GET", &format!("/user-activities/{}", created["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["activity_type_id"], type_id);
    assert!(fetched.get("activity_type").is_none());
    assert_eq!(fetched["user"]["username"], "alice");
}

#[tokio::test]
async fn test_achievement_criteria_foreign_key_updates() {
    let state = setup_test_state(1024).await;
    let app = api::api_router(&state).await;

    let first = create(&app, "/achievements", achievement("First")).await;
    let second = create(&app, "/achievements", achievement("Second")).await;
    let type_id = create(&app, "/activity-types", activity_type("Review")).await;

    let criteria_id = create(
        &app,
        "/achievement-criteria",
        json!({
            "achievement_id": first,
            "activity_type_id": type_id,
            "required_count": 3,
            "time_frame": 7
        }),
    )
    .await;
    let uri = format!("/achievement-criteria/{}", criteria_id);

    // 0 and "" leave foreign keys alone
    let (status, unchanged) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "achievement_id": 0, "activity_type_id": "", "required_count": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["achievement_id"], first);
    assert_eq!(unchanged["activity_type_id"], type_id);
    assert_eq!(unchanged["required_count"], 4);

    let (_, moved) = send(&app, "PUT", &uri, Some(json!({ "achievement_id": second }))).await;
    assert_eq!(moved["achievement_id"], second);
    assert_eq!(moved["achievement"]["name"], "Second");
    assert_eq!(moved["activity_type"]["name"], "Review");
}

#[tokio::test]
async fn test_per_user_records() {
    let state = setup_test_state(1024).await;
    let user_id = create_test_user(&state.db, "bob").await;
    let app = api::api_router(&state).await;

    let point_type = create(
        &app,
        "/point-types",
        json!({ "name": "XP", "description": "", "icon": "" }),
    )
    .await;
    let level = create(
        &app,
        "/levels",
        json!({ "level_number": 2, "xp_required": 200, "title": "Reader", "rewards": "badge" }),
    )
    .await;
    let badge = create(&app, "/achievements", achievement("Bookworm")).await;
    let challenge = create(
        &app,
        "/challenges",
        json!({
            "name": "Marathon",
            "description": "",
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2024-12-31T00:00:00Z",
            "reward_type": "points",
            "reward_value": "100",
            "is_active": true
        }),
    )
    .await;
    let board = create(
        &app,
        "/leaderboards",
        json!({
            "name": "Weekly",
            "type": "points",
            "period": "weekly",
            "reset_frequency": "weekly",
            "is_active": true
        }),
    )
    .await;

    let (status, points) = send(
        &app,
        "POST",
        "/user-points",
        Some(json!({
            "user_id": user_id,
            "point_type_id": point_type,
            "current_balance": 50,
            "lifetime_earned": 120
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(points["point_type"]["name"], "XP");
    assert_eq!(points["user"]["username"], "bob");

    let (_, standing) = send(
        &app,
        "POST",
        "/user-levels",
        Some(json!({
            "user_id": user_id,
            "current_level_id": level,
            "current_xp": 230,
            "last_leveled_up": "2024-03-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(standing["current_level"]["title"], "Reader");

    let (_, earned) = send(
        &app,
        "POST",
        "/user-achievements",
        Some(json!({
            "user_id": user_id,
            "achievement_id": badge,
            "progress": 100,
            "completed_at": "2024-03-02T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(earned["achievement"]["name"], "Bookworm");

    let (_, joined) = send(
        &app,
        "POST",
        "/user-challenges",
        Some(json!({
            "user_id": user_id,
            "challenge_id": challenge,
            "progress": 40,
            "completed_at": "2024-04-01T00:00:00Z",
            "reward_claimed": false
        })),
    )
    .await;
    assert_eq!(joined["challenge"]["name"], "Marathon");

    let (status, entry) = send(
        &app,
        "POST",
        "/leaderboard-entries",
        Some(json!({
            "leaderboard_id": board,
            "user_id": user_id,
            "score": 900,
            "rank": 1,
            "period_start": "2024-04-01T00:00:00Z",
            "period_end": "2024-04-07T23:59:59Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["rank"], 1);
    assert_eq!(entry["leaderboard"]["type"], "points");

    let (_, claimed) = send(
        &app,
        "PUT",
        &format!("/user-challenges/{}", joined["id"]),
        Some(json!({ "reward_claimed": "true", "progress": 100 })),
    )
    .await;
    assert_eq!(claimed["reward_claimed"], true);
    assert_eq!(claimed["progress"], 100);
}

#[tokio::test]
async fn test_icon_upload_and_removal() {
    let state = setup_test_state(1024).await;
    let storage_root = state.storage.root().to_path_buf();
    let app = api::api_router(&state).await;

    let id = create(&app, "/achievements", achievement("Collector")).await;
    let icon_uri = format!("/achievements/{}/icon", id);

    let (status, first) = upload(&app, &icon_uri, "file", "badge.PNG", b"first image").await;
    assert_eq!(status, StatusCode::OK, "{}", first);
    assert_eq!(first["icon"]["filename"], "badge.PNG");
    assert_eq!(first["icon"]["size"], 11);
    let first_url = first["icon"]["url"].as_str().unwrap().to_string();
    assert!(first_url.starts_with(&format!("/storage/achievement/{}/", id)));
    assert!(first_url.ends_with(".png"));

    // Replacing drops the old file
    let (_, second) = upload(&app, &icon_uri, "file", "badge2.png", b"second").await;
    let second_url = second["icon"]["url"].as_str().unwrap().to_string();
    assert_ne!(first_url, second_url);
    let old_file = storage_root.join(first_url.trim_start_matches("/storage/"));
    assert!(!old_file.exists());

    // Detail and list both show the icon
    let (_, detail) = send(&app, "GET", &format!("/achievements/{}", id), None).await;
    assert_eq!(detail["icon"]["url"], second_url.as_str());
    let (_, list) = send(&app, "GET", "/achievements", None).await;
    assert_eq!(list["data"][0]["icon"]["url"], second_url.as_str());

    let req = Request::builder()
        .method("DELETE")
        .uri(&icon_uri)
        .body(Body::empty())
        .unwrap();
    let (status, body) = read(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File deleted successfully");

    let (_, detail) = send(&app, "GET", &format!("/achievements/{}", id), None).await;
    assert!(detail.get("icon").is_none());
    let new_file = storage_root.join(second_url.trim_start_matches("/storage/"));
    assert!(!new_file.exists());
}

#[tokio::test]
async fn test_icon_upload_errors() {
    let state = setup_test_state(16).await;
    let app = api::api_router(&state).await;

    let id = create(
        &app,
        "/levels",
        json!({ "level_number": 1, "xp_required": 0, "title": "Novice", "rewards": "" }),
    )
    .await;
    let icon_uri = format!("/levels/{}/icon", id);

    // Wrong field name
    let (status, body) = upload(&app, &icon_uri, "image", "a.png", b"data").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");

    let (status, kept) = upload(&app, &icon_uri, "file", "small.png", b"tiny").await;
    assert_eq!(status, StatusCode::OK);

    // Over the configured limit; the current icon survives
    let (status, _) = upload(&app, &icon_uri, "file", "a.png", &[7u8; 64]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, detail) = send(&app, "GET", &format!("/levels/{}", id), None).await;
    assert_eq!(detail["icon"]["url"], kept["icon"]["url"]);

    // Not multipart
    let (status, _) = send(&app, "PUT", &icon_uri, Some(json!({ "file": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown level
    let (status, _) = upload(&app, "/levels/999/icon", "file", "a.png", b"data").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Bad id
    let (status, _) = upload(&app, "/levels/abc/icon", "file", "a.png", b"data").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
