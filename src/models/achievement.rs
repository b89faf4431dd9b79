use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::attachment;
use crate::domain::Patch;

/// Attachment `model_type` for achievement icons
pub const MODEL_NAME: &str = "achievement";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "achievements")]
#[schema(as = Achievement)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty_level: i32,
    pub is_hidden: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::achievement_criteria::Entity")]
    AchievementCriteria,
    #[sea_orm(has_many = "super::user_achievement::Entity")]
    UserAchievement,
}

impl Related<super::achievement_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AchievementCriteria.def()
    }
}

impl Related<super::user_achievement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAchievement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The icon is uploaded separately through `PUT /achievements/:id/icon`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAchievementRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty_level: i32,
    pub is_hidden: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateAchievementRequest {
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub category: Patch<String>,
    #[schema(value_type = Option<i32>)]
    pub difficulty_level: Patch<i32>,
    #[schema(value_type = Option<bool>)]
    pub is_hidden: Patch<bool>,
    #[schema(value_type = Option<bool>)]
    pub is_active: Patch<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AchievementListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Attachment>)]
    pub icon: Option<attachment::Model>,
    pub category: String,
    pub difficulty_level: i32,
    pub is_hidden: bool,
    pub is_active: bool,
}

impl AchievementListResponse {
    pub fn new(model: Model, icon: Option<attachment::Model>) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            name: model.name,
            description: model.description,
            icon,
            category: model.category,
            difficulty_level: model.difficulty_level,
            is_hidden: model.is_hidden,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AchievementResponse {
    #[serde(flatten)]
    #[schema(value_type = Achievement)]
    pub achievement: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Attachment>)]
    pub icon: Option<attachment::Model>,
}
