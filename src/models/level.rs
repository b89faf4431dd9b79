use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::attachment;
use crate::domain::Patch;

/// Attachment `model_type` for level icons
pub const MODEL_NAME: &str = "level";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "levels")]
#[schema(as = Level)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub level_number: i32,
    pub xp_required: i32,
    pub title: String,
    pub rewards: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_level::Entity")]
    UserLevel,
}

impl Related<super::user_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLevelRequest {
    pub level_number: i32,
    pub xp_required: i32,
    pub title: String,
    pub rewards: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateLevelRequest {
    #[schema(value_type = Option<i32>)]
    pub level_number: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub xp_required: Patch<i32>,
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub rewards: Patch<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub level_number: i32,
    pub xp_required: i32,
    pub title: String,
    pub rewards: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Attachment>)]
    pub icon: Option<attachment::Model>,
}

impl LevelListResponse {
    pub fn new(model: Model, icon: Option<attachment::Model>) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            level_number: model.level_number,
            xp_required: model.xp_required,
            title: model.title,
            rewards: model.rewards,
            icon,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelResponse {
    #[serde(flatten)]
    #[schema(value_type = Level)]
    pub level: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Attachment>)]
    pub icon: Option<attachment::Model>,
}
