use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::user_level::{
    CreateUserLevelRequest, Model, UpdateUserLevelRequest, UserLevelListResponse, UserLevelResponse,
};
use crate::services::UserLevelService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS userlevels (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                current_level_id INTEGER NOT NULL,
                current_xp INTEGER NOT NULL DEFAULT 0,
                last_leveled_up TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (current_level_id) REFERENCES levels(id)
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_userlevels_deleted_at ON userlevels(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_userlevels_current_level_id ON userlevels(current_level_id)",
    "CREATE INDEX IF NOT EXISTS idx_userlevels_user_id ON userlevels(user_id)",
];

pub struct UserLevelsModule;

impl Module for UserLevelsModule {
    fn name(&self) -> &'static str {
        "user-levels"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(UserLevelService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/user-levels", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateUserLevelRequest,
            UpdateUserLevelRequest,
            UserLevelResponse,
            UserLevelListResponse,
        >()
    }
}
