//! Leaderboard entries: one user's score and rank on a leaderboard for a period.

use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::leaderboard_entry::{
    CreateLeaderboardEntryRequest,
    LeaderboardEntryListResponse,
    LeaderboardEntryResponse,
    Model,
    UpdateLeaderboardEntryRequest,
};
use crate::services::LeaderboardEntryService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS leaderboardentries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                leaderboard_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                score INTEGER NOT NULL DEFAULT 0,
                "rank" INTEGER NOT NULL DEFAULT 0,
                period_start TEXT NOT NULL,
                period_end TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (leaderboard_id) REFERENCES leaderboards(id),
                FOREIGN KEY (user_id) REFERENCES users(id)
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_leaderboardentries_deleted_at ON leaderboardentries(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_leaderboardentries_leaderboard_id ON leaderboardentries(leaderboard_id)",
    "CREATE INDEX IF NOT EXISTS idx_leaderboardentries_user_id ON leaderboardentries(user_id)",
];

pub struct LeaderboardEntriesModule;

impl Module for LeaderboardEntriesModule {
    fn name(&self) -> &'static str {
        "leaderboard-entries"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(LeaderboardEntryService::new(
            state.db.clone(),
            state.emitter.clone(),
        ));
        Router::new().nest("/leaderboard-entries", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateLeaderboardEntryRequest,
            UpdateLeaderboardEntryRequest,
            LeaderboardEntryResponse,
            LeaderboardEntryListResponse,
        >()
    }
}
