use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::user_challenge::{
    CreateUserChallengeRequest,
    Model,
    UpdateUserChallengeRequest,
    UserChallengeListResponse,
    UserChallengeResponse,
};
use crate::services::UserChallengeService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS userchallenges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                challenge_id INTEGER NOT NULL,
                progress INTEGER NOT NULL DEFAULT 0,
                completed_at TEXT NOT NULL,
                reward_claimed BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (challenge_id) REFERENCES challenges(id)
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_userchallenges_deleted_at ON userchallenges(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_userchallenges_challenge_id ON userchallenges(challenge_id)",
    "CREATE INDEX IF NOT EXISTS idx_userchallenges_user_id ON userchallenges(user_id)",
];

pub struct UserChallengesModule;

impl Module for UserChallengesModule {
    fn name(&self) -> &'static str {
        "user-challenges"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(UserChallengeService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/user-challenges", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateUserChallengeRequest,
            UpdateUserChallengeRequest,
            UserChallengeResponse,
            UserChallengeListResponse,
        >()
    }
}
