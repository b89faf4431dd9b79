//! Generic CRUD handlers
//!
//! Every module exposes the same six routes; the handlers here are written
//! once against `CrudService` and instantiated per service type.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::{ApiError, ApiJson};
use crate::domain::{CrudService, PageRequest, PaginatedResponse};

/// Raw `page`/`limit` values; validated by hand so bad input gets our message
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn into_page_request(self) -> Result<PageRequest, ApiError> {
        let page = parse_positive(self.page.as_deref(), "Invalid page number")?;
        let limit = parse_positive(self.limit.as_deref(), "Invalid limit number")?;
        Ok(PageRequest::new(page, limit))
    }
}

fn parse_positive(raw: Option<&str>, message: &str) -> Result<Option<u64>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(message.to_string())),
    }
}

/// Path ids are unsigned and must fit the `INTEGER` primary key.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<u32>()
        .ok()
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid id format".to_string()))
}

pub async fn list<S: CrudService>(
    State(service): State<Arc<S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<S::ListItem>>, ApiError> {
    let page = params.into_page_request()?;
    service
        .get_all(page)
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to fetch items"))
}

pub async fn list_all<S: CrudService>(
    State(service): State<Arc<S>>,
) -> Result<Json<PaginatedResponse<S::ListItem>>, ApiError> {
    service
        .get_all(PageRequest::unbounded())
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to fetch all items"))
}

pub async fn get_one<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<S::Detail>, ApiError> {
    let id = parse_id(&id)?;
    service
        .get_by_id(id)
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to fetch item"))
}

pub async fn create<S: CrudService>(
    State(service): State<Arc<S>>,
    ApiJson(payload): ApiJson<S::Create>,
) -> Result<(StatusCode, Json<S::Detail>), ApiError> {
    let created = service
        .create(payload)
        .await
        .map_err(ApiError::context("Failed to create item"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<S::Update>,
) -> Result<Json<S::Detail>, ApiError> {
    let id = parse_id(&id)?;
    service
        .update(id, payload)
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to update item"))
}

pub async fn delete<S: CrudService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    service
        .delete(id)
        .await
        .map_err(ApiError::context("Failed to delete item"))?;
    Ok(Json(json!({ "message": "Item deleted successfully" })))
}

/// `GET /`, `POST /`, `GET /all` and `GET|PUT|DELETE /:id` for one service.
/// Nest the result under the module's plural path.
pub fn crud_routes<S: CrudService>(service: Arc<S>) -> Router {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/all", get(list_all::<S>))
        .route(
            "/:id",
            get(get_one::<S>).put(update::<S>).delete(delete::<S>),
        )
        .with_state(service)
}
