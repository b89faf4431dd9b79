//! Services - one per gamification module
//!
//! Each service wraps the ORM for a single entity: soft-delete aware reads,
//! partial updates, pagination and event emission.

pub mod achievement_criteria_service;
pub mod achievement_service;
pub mod activity_type_service;
pub mod challenge_service;
pub mod leaderboard_entry_service;
pub mod leaderboard_service;
pub mod level_service;
pub mod point_type_service;
pub mod user_achievement_service;
pub mod user_activity_service;
pub mod user_challenge_service;
pub mod user_level_service;
pub mod user_point_service;

pub use achievement_criteria_service::AchievementCriteriaService;
pub use achievement_service::AchievementService;
pub use activity_type_service::ActivityTypeService;
pub use challenge_service::ChallengeService;
pub use leaderboard_entry_service::LeaderboardEntryService;
pub use leaderboard_service::LeaderboardService;
pub use level_service::LevelService;
pub use point_type_service::PointTypeService;
pub use user_achievement_service::UserAchievementService;
pub use user_activity_service::UserActivityService;
pub use user_challenge_service::UserChallengeService;
pub use user_level_service::UserLevelService;
pub use user_point_service::UserPointService;

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select};

use crate::domain::PageRequest;

/// Timestamp format stored in every `*_at` column
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Count every row matched by `select`, then fetch the requested page of it.
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    page: PageRequest,
) -> Result<(Vec<E::Model>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let total = select.clone().count(db).await?;

    let query = match page.window() {
        Some((offset, limit)) => select.offset(offset).limit(limit),
        None => select,
    };
    let items = query.all(db).await?;

    Ok((items, total))
}
