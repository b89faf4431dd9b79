use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{achievement, user};
use crate::domain::Patch;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "userachievements")]
#[schema(as = UserAchievement)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub achievement_id: i32,
    pub progress: i32,
    pub completed_at: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::achievement::Entity",
        from = "Column::AchievementId",
        to = "super::achievement::Column::Id"
    )]
    Achievement,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::achievement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Achievement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserAchievementRequest {
    pub user_id: i32,
    pub achievement_id: i32,
    pub progress: i32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserAchievementRequest {
    #[schema(value_type = Option<i32>)]
    pub user_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub achievement_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub progress: Patch<i32>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub completed_at: Patch<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserAchievementListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: i32,
    pub achievement_id: i32,
    pub progress: i32,
    pub completed_at: String,
}

impl From<Model> for UserAchievementListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user_id: model.user_id,
            achievement_id: model.achievement_id,
            progress: model.progress,
            completed_at: model.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserAchievementResponse {
    #[serde(flatten)]
    #[schema(value_type = UserAchievement)]
    pub record: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<User>)]
    pub user: Option<user::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Achievement>)]
    pub achievement: Option<achievement::Model>,
}
