use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::user_point::{
    CreateUserPointRequest, Model, UpdateUserPointRequest, UserPointListResponse, UserPointResponse,
};
use crate::services::UserPointService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS userpoints (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                point_type_id INTEGER NOT NULL,
                current_balance INTEGER NOT NULL DEFAULT 0,
                lifetime_earned INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (point_type_id) REFERENCES pointtypes(id)
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_userpoints_deleted_at ON userpoints(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_userpoints_point_type_id ON userpoints(point_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_userpoints_user_id ON userpoints(user_id)",
];

pub struct UserPointsModule;

impl Module for UserPointsModule {
    fn name(&self) -> &'static str {
        "user-points"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(UserPointService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/user-points", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateUserPointRequest,
            UpdateUserPointRequest,
            UserPointResponse,
            UserPointListResponse,
        >()
    }
}
