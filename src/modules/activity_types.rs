//! Activity types: the catalog of rewardable actions.

use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::activity_type::{
    ActivityTypeListResponse,
    ActivityTypeResponse,
    CreateActivityTypeRequest,
    Model,
    UpdateActivityTypeRequest,
};
use crate::services::ActivityTypeService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS activitytypes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                points_value INTEGER NOT NULL DEFAULT 0,
                cooldown_period INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_activitytypes_deleted_at ON activitytypes(deleted_at)",
];

pub struct ActivityTypesModule;

impl Module for ActivityTypesModule {
    fn name(&self) -> &'static str {
        "activity-types"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(ActivityTypeService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/activity-types", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreateActivityTypeRequest,
            UpdateActivityTypeRequest,
            ActivityTypeResponse,
            ActivityTypeListResponse,
        >()
    }
}
