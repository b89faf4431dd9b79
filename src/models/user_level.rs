use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{level, user};
use crate::domain::Patch;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "userlevels")]
#[schema(as = UserLevel)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub current_level_id: i32,
    pub current_xp: i32,
    pub last_leveled_up: String,
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
        belongs_to = "super::level::Entity",
        from = "Column::CurrentLevelId",
        to = "super::level::Column::Id"
    )]
    CurrentLevel,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CurrentLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserLevelRequest {
    pub user_id: i32,
    pub current_level_id: i32,
    pub current_xp: i32,
    pub last_leveled_up: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserLevelRequest {
    #[schema(value_type = Option<i32>)]
    pub user_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub current_level_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub current_xp: Patch<i32>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub last_leveled_up: Patch<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserLevelListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: i32,
    pub current_level_id: i32,
    pub current_xp: i32,
    pub last_leveled_up: String,
}

impl From<Model> for UserLevelListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user_id: model.user_id,
            current_level_id: model.current_level_id,
            current_xp: model.current_xp,
            last_leveled_up: model.last_leveled_up,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserLevelResponse {
    #[serde(flatten)]
    #[schema(value_type = UserLevel)]
    pub standing: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<User>)]
    pub user: Option<user::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Level>)]
    pub current_level: Option<level::Model>,
}
