//! Levels, with an uploadable icon.

use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::attachments::icon_routes;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::level::{
    CreateLevelRequest, LevelListResponse, LevelResponse, Model, UpdateLevelRequest,
};
use crate::services::LevelService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS levels (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                level_number INTEGER NOT NULL,
                xp_required INTEGER NOT NULL DEFAULT 0,
                title TEXT NOT NULL DEFAULT '',
                rewards TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_levels_deleted_at ON levels(deleted_at)",
];

pub struct LevelsModule;

impl Module for LevelsModule {
    fn name(&self) -> &'static str {
        "levels"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(LevelService::new(
            state.db.clone(),
            state.emitter.clone(),
            state.storage.clone(),
        ));
        Router::new().nest(
            "/levels",
            crud_routes(service.clone()).merge(icon_routes(service, state.max_upload_bytes)),
        )
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateLevelRequest,
            UpdateLevelRequest,
            LevelResponse,
            LevelListResponse,
        >()
        .with_icon()
    }
}
