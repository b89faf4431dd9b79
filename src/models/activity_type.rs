use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Patch;

/// Something a user can do that earns points and counts toward achievements.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "activitytypes")]
#[schema(as = ActivityType)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub points_value: i32,
    /// Seconds before the activity can be rewarded again
    pub cooldown_period: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_activity::Entity")]
    UserActivity,
    #[sea_orm(has_many = "super::achievement_criteria::Entity")]
    AchievementCriteria,
}

impl Related<super::user_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserActivity.def()
    }
}

impl Related<super::achievement_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AchievementCriteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateActivityTypeRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    pub points_value: i32,
    pub cooldown_period: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateActivityTypeRequest {
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub category: Patch<String>,
    #[schema(value_type = Option<i32>)]
    pub points_value: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub cooldown_period: Patch<i32>,
    #[schema(value_type = Option<bool>)]
    pub is_active: Patch<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityTypeListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub points_value: i32,
    pub cooldown_period: i32,
    pub is_active: bool,
}

impl From<Model> for ActivityTypeListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            name: model.name,
            description: model.description,
            category: model.category,
            points_value: model.points_value,
            cooldown_period: model.cooldown_period,
            is_active: model.is_active,
        }
    }
}

/// Detail view: the stored record as-is, soft-delete marker included
pub type ActivityTypeResponse = Model;
