//! Achievements, with an uploadable icon.

use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::attachments::icon_routes;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::achievement::{
    AchievementListResponse,
    AchievementResponse,
    CreateAchievementRequest,
    Model,
    UpdateAchievementRequest,
};
use crate::services::AchievementService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS achievements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                difficulty_level INTEGER NOT NULL DEFAULT 0,
                is_hidden BOOLEAN NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_achievements_deleted_at ON achievements(deleted_at)",
];

pub struct AchievementsModule;

impl Module for AchievementsModule {
    fn name(&self) -> &'static str {
        "achievements"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(AchievementService::new(
            state.db.clone(),
            state.emitter.clone(),
            state.storage.clone(),
        ));
        Router::new().nest(
            "/achievements",
            crud_routes(service.clone()).merge(icon_routes(service, state.max_upload_bytes)),
        )
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateAchievementRequest,
            UpdateAchievementRequest,
            AchievementResponse,
            AchievementListResponse,
        >()
        .with_icon()
    }
}
