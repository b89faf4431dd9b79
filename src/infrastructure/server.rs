// Server module - router assembly and the HTTP listener

use axum::http::HeaderValue;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::config::Config;
use crate::infrastructure::AppState;

/// CORS policy: the configured origins, or any origin when none are set
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let mut origins = Vec::new();
    for origin in allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }
    cors.allow_origin(origins)
}

/// Build the full application: `/api` (modules migrated and mounted), Swagger
/// UI, and the attachment files when they are served locally.
pub async fn build_router(state: AppState, config: &Config) -> Router {
    let api_router = api::api_router(&state).await;

    let mut app = Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_router);

    // A relative base URL means this process serves the files itself
    let base_url = &config.storage.base_url;
    if base_url.starts_with('/') && base_url.len() > 1 {
        app = app.nest_service(base_url, ServeDir::new(&config.storage.path));
    }

    app.layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped
pub async fn serve(app: Router, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Gamification server listening on {}", addr);
    axum::serve(listener, app).await
}
