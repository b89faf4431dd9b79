use std::sync::Arc;

use axum::Router;

use super::Module;
use crate::api::crud::crud_routes;
use crate::api_docs::ApiSchemas;
use crate::infrastructure::AppState;
use crate::models::point_type::{
    CreatePointTypeRequest, Model, PointTypeListResponse, PointTypeResponse, UpdatePointTypeRequest,
};
use crate::services::PointTypeService;

pub const SCHEMA: &[&str] = &[
    r#"
            CREATE TABLE IF NOT EXISTS pointtypes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                icon TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
    "CREATE INDEX IF NOT EXISTS idx_pointtypes_deleted_at ON pointtypes(deleted_at)",
];

pub struct PointTypesModule;

impl Module for PointTypesModule {
    fn name(&self) -> &'static str {
        "point-types"
    }

    fn schema(&self) -> &'static [&'static str] {
        SCHEMA
    }

    fn routes(&self, state: &AppState) -> Router {
        let service = Arc::new(PointTypeService::new(state.db.clone(), state.emitter.clone()));
        Router::new().nest("/point-types", crud_routes(service))
    }

    fn api_schemas(&self) -> ApiSchemas {
        ApiSchemas::of::<
            Model,
            CreatePointTypeRequest,
            UpdatePointTypeRequest,
            PointTypeResponse,
            PointTypeListResponse,
        >()
    }
}
