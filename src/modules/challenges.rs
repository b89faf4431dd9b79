use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::challenge::{
    ChallengeListResponse, ChallengeResponse, CreateChallengeRequest, Model, UpdateChallengeRequest,
};
use crate::services::ChallengeService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS challenges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                reward_type TEXT NOT NULL DEFAULT '',
                reward_value TEXT NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_challenges_deleted_at ON challenges(deleted_at)",
];

pub struct ChallengesModule;

impl Module for ChallengesModule {
    fn name(&self) -> &'static str {
        "challenges"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(ChallengeService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/challenges", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateChallengeRequest,
            UpdateChallengeRequest,
            ChallengeResponse,
            ChallengeListResponse,
        >()
    }
}
