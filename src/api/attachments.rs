//! Icon upload / removal for modules implementing `IconService`

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    routing::put,
    Json, Router,
};
use serde_json::{json, Value};

use super::crud::parse_id;
use super::error::ApiError;
use crate::domain::{FileUpload, IconService};

/// Multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// `PUT /:id/icon` with a multipart `file` part
pub async fn upload_icon<S: IconService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<S::Detail>, ApiError> {
    let id = parse_id(&id)?;
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?.to_vec();

        upload = Some(FileUpload {
            filename,
            content_type,
            data,
        });
        break;
    }

    let upload = upload.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    service
        .upload_icon(id, upload)
        .await
        .map(Json)
        .map_err(ApiError::context("Failed to upload file"))
}

/// `DELETE /:id/icon`
pub async fn delete_icon<S: IconService>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    service
        .remove_icon(id)
        .await
        .map_err(ApiError::context("Failed to delete file"))?;
    Ok(Json(json!({ "message": "File deleted successfully" })))
}

/// Icon routes for one service; merge next to `crud_routes` under the same
/// plural path.
pub fn icon_routes<S: IconService>(service: Arc<S>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/:id/icon", put(upload_icon::<S>).delete(delete_icon::<S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD))
        .with_state(service)
}
