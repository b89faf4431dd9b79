//! Achievement criteria: links an achievement to the activity that unlocks it.

use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::achievement_criteria::{
    AchievementCriteriaListResponse,
    AchievementCriteriaResponse,
    CreateAchievementCriteriaRequest,
    Model,
    UpdateAchievementCriteriaRequest,
};
use crate::services::AchievementCriteriaService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS achievementcriteria (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                achievement_id INTEGER NOT NULL,
                activity_type_id INTEGER NOT NULL,
                required_count INTEGER NOT NULL DEFAULT 0,
                time_frame INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (achievement_id) REFERENCES achievements(id),
                FOREIGN KEY (activity_type_id) REFERENCES activitytypes(id)
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_achievementcriteria_deleted_at ON achievementcriteria(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_achievementcriteria_achievement_id ON achievementcriteria(achievement_id)",
    "CREATE INDEX IF NOT EXISTS idx_achievementcriteria_activity_type_id ON achievementcriteria(activity_type_id)",
];

pub struct AchievementCriteriaModule;

impl Module for AchievementCriteriaModule {
    fn name(&self) -> &'static str {
        "achievement-criteria"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(AchievementCriteriaService::new(
            state.db.clone(),
            state.emitter.clone(),
        ));
        Router::new().nest("/achievement-criteria", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateAchievementCriteriaRequest,
            UpdateAchievementCriteriaRequest,
            AchievementCriteriaResponse,
            AchievementCriteriaListResponse,
        >()
    }
}
