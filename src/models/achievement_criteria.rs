use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{achievement, activity_type};
use crate::domain::Patch;

/// "Perform `activity_type` `required_count` times within `time_frame`" to earn `achievement`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "achievementcriteria")]
#[schema(as = AchievementCriteria)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub achievement_id: i32,
    pub activity_type_id: i32,
    pub required_count: i32,
    pub time_frame: i32,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::achievement::Entity",
        from = "Column::AchievementId",
        to = "super::achievement::Column::Id"
    )]
    Achievement,
    #[sea_orm(
        belongs_to = "super::activity_type::Entity",
        from = "Column::ActivityTypeId",
        to = "super::activity_type::Column::Id"
    )]
    ActivityType,
}

impl Related<super::achievement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Achievement.def()
    }
}

impl Related<super::activity_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAchievementCriteriaRequest {
    pub achievement_id: i32,
    pub activity_type_id: i32,
    pub required_count: i32,
    pub time_frame: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateAchievementCriteriaRequest {
    #[schema(value_type = Option<i32>)]
    pub achievement_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub activity_type_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub required_count: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub time_frame: Patch<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AchievementCriteriaListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub achievement_id: i32,
    pub activity_type_id: i32,
    pub required_count: i32,
    pub time_frame: i32,
}

impl From<Model> for AchievementCriteriaListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            achievement_id: model.achievement_id,
            activity_type_id: model.activity_type_id,
            required_count: model.required_count,
            time_frame: model.time_frame,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AchievementCriteriaResponse {
    #[serde(flatten)]
    #[schema(value_type = AchievementCriteria)]
    pub criteria: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Achievement>)]
    pub achievement: Option<achievement::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<ActivityType>)]
    pub activity_type: Option<activity_type::Model>,
}
