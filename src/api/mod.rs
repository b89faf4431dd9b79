pub mod attachments;
pub mod crud;
pub mod error;
pub mod health;

pub use error::{ApiError, ApiJson};

use axum::{routing::get, Router};

use crate::infrastructure::AppState;
use crate::modules;

/// Everything served under `/api`: health plus every module that migrated.
pub async fn api_router(state: &AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(modules::mount(state).await)
}
