use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::user_achievement::{
    CreateUserAchievementRequest,
    Model,
    UpdateUserAchievementRequest,
    UserAchievementListResponse,
    UserAchievementResponse,
};
use crate::services::UserAchievementService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS userachievements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                achievement_id INTEGER NOT NULL,
                progress INTEGER NOT NULL DEFAULT 0,
                completed_at TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (achievement_id) REFERENCES achievements(id)
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_userachievements_deleted_at ON userachievements(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_userachievements_achievement_id ON userachievements(achievement_id)",
    "CREATE INDEX IF NOT EXISTS idx_userachievements_user_id ON userachievements(user_id)",
];

pub struct UserAchievementsModule;

impl Module for UserAchievementsModule {
    fn name(&self) -> &'static str {
        "user-achievements"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(UserAchievementService::new(
            state.db.clone(),
            state.emitter.clone(),
        ));
        Router::new().nest("/user-achievements", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateUserAchievementRequest,
            UpdateUserAchievementRequest,
            UserAchievementResponse,
            UserAchievementListResponse,
        >()
    }
}
