//! Module descriptors
//!
//! A module bundles one entity's schema and routes. `registry` lists them in
//! foreign-key order so a table is always created after the ones it
//! references.

pub mod achievement_criteria;
pub mod achievements;
pub mod activity_types;
pub mod challenges;
pub mod leaderboard_entries;
pub mod leaderboards;
pub mod levels;
pub mod point_types;
pub mod user_achievements;
pub mod user_activities;
pub mod user_challenges;
pub mod user_levels;
pub mod user_points;

use async_trait::async_trait;
use axum::Router;
use sea_orm::{DatabaseConnection, DbErr};

use crate::api_docs::ApiSchemas;
use crate::infrastructure::db::execute_schema;
use crate::infrastructure::AppState;

#[async_trait]
pub trait Module: Send + Sync {
    /// Plural path segment, e.g. `activity-types`
    fn name(&self) -> &'static str;

    /// `CREATE TABLE` / `CREATE INDEX` statements, all idempotent
    fn schema(&self) -> &'static [&'static str];

    async fn migrate(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        execute_schema(db, self.schema()).await
    }

    /// Routes relative to `/api`
    fn routes(&self, state: &AppState) -> Router;

    /// Payload schemas for the generated OpenAPI document
    fn api_schemas(&self) -> ApiSchemas;
}

pub fn registry() -> Vec<Box<dyn Module>> {
    vec![
        Box::new(activity_types::ActivityTypesModule),
        Box::new(point_types::PointTypesModule),
        Box::new(achievements::AchievementsModule),
        Box::new(levels::LevelsModule),
        Box::new(challenges::ChallengesModule),
        Box::new(leaderboards::LeaderboardsModule),
        Box::new(achievement_criteria::AchievementCriteriaModule),
        Box::new(user_activities::UserActivitiesModule),
        Box::new(user_points::UserPointsModule),
        Box::new(user_achievements::UserAchievementsModule),
        Box::new(user_levels::UserLevelsModule),
        Box::new(user_challenges::UserChallengesModule),
        Box::new(leaderboard_entries::LeaderboardEntriesModule),
    ]
}

/// Migrate and mount every registered module.
pub async fn mount(state: &AppState) -> Router {
    mount_modules(state, registry()).await
}

/// A module whose migration fails is logged and left out; the rest still mount.
pub async fn mount_modules(state: &AppState, modules: Vec<Box<dyn Module>>) -> Router {
    let mut router = Router::new();

    for module in modules {
        if let Err(e) = module.migrate(state.db()).await {
            tracing::error!(
                module = module.name(),
                error = %e,
                "Migration failed, module not mounted"
            );
            continue;
        }

        router = router.merge(module.routes(state));
        tracing::debug!(module = module.name(), "Module mounted");
    }

    router
}

/// Create every module table without building routes
pub async fn migrate_all(db: &DatabaseConnection) -> Result<(), DbErr> {
    for module in registry() {
        module.migrate(db).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::StorageConfig;
    use crate::infrastructure::db::init_db;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::collections::HashSet;
    use tower::util::ServiceExt;

    struct BrokenModule;

    impl Module for BrokenModule {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn schema(&self) -> &'static [&'static str] {
            &["CREATE TABLE broken ("]
        }

        fn routes(&self, _state: &AppState) -> Router {
            Router::new().route("/broken", axum::routing::get(|| async { "unreachable" }))
        }

        fn api_schemas(&self) -> ApiSchemas {
            use crate::models::activity_type::*;
            ApiSchemas::of::<
                Model,
                CreateActivityTypeRequest,
                UpdateActivityTypeRequest,
                ActivityTypeResponse,
                ActivityTypeListResponse,
            >()
        }
    }

    #[test]
    fn module_names_are_unique() {
        let names: Vec<_> = registry().iter().map(|m| m.name()).collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), 13);
        assert_eq!(unique.len(), names.len());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = init_db("sqlite::memory:").await.unwrap();
        migrate_all(&db).await.unwrap();
        migrate_all(&db).await.unwrap();
    }

    #[tokio::test]
    async fn failed_migration_skips_only_that_module() {
        let db = init_db("sqlite::memory:").await.unwrap();
        let state = AppState::new(db, StorageConfig::default());

        let mut modules = registry();
        modules.insert(0, Box::new(BrokenModule));
        let app = mount_modules(&state, modules).await;

        let broken = app
            .clone()
            .oneshot(Request::builder().uri("/broken").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(broken.status(), StatusCode::NOT_FOUND);

        let levels = app
            .oneshot(Request::builder().uri("/levels").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(levels.status(), StatusCode::OK);
    }
}
