use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::user_activity::{
    CreateUserActivityRequest,
    Model,
    UpdateUserActivityRequest,
    UserActivityListResponse,
    UserActivityResponse,
};
use crate::services::UserActivityService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS useractivities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                activity_type_id INTEGER NOT NULL,
                points_earned INTEGER NOT NULL DEFAULT 0,
                metadata TEXT NOT NULL DEFAULT '',
                completed_at TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (activity_type_id) REFERENCES activitytypes(id)
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_useractivities_deleted_at ON useractivities(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_useractivities_activity_type_id ON useractivities(activity_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_useractivities_user_id ON useractivities(user_id)",
];

pub struct UserActivitiesModule;

impl Module for UserActivitiesModule {
    fn name(&self) -> &'static str {
        "user-activities"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(UserActivityService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/user-activities", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateUserActivityRequest,
            UpdateUserActivityRequest,
            UserActivityResponse,
            UserActivityListResponse,
        >()
    }
}
