use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamification::infrastructure::AppState;
use gamification::{config, db, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamification=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let state = AppState::new(db, config.storage.clone());
    let app = server::build_router(state, &config).await;

    if let Err(e) = server::serve(app, config.port).await {
        tracing::error!("Server stopped: {}", e);
    }
}
