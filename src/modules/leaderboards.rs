use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::leaderboard::{
    CreateLeaderboardRequest,
    LeaderboardListResponse,
    LeaderboardResponse,
    Model,
    UpdateLeaderboardRequest,
};
use crate::services::LeaderboardService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS leaderboards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                "type" TEXT NOT NULL DEFAULT '',
                period TEXT NOT NULL DEFAULT '',
                reset_frequency TEXT NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_leaderboards_deleted_at ON leaderboards(deleted_at)",
];

pub struct LeaderboardsModule;

impl Module for LeaderboardsModule {
    fn name(&self) -> &'static str {
        "leaderboards"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(LeaderboardService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/leaderboards", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateLeaderboardRequest,
            UpdateLeaderboardRequest,
            LeaderboardResponse,
            LeaderboardListResponse,
        >()
    }
}
