use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{activity_type, user};
use crate::domain::Patch;

/// One logged occurrence of an activity by a user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "useractivities")]
#[schema(as = UserActivity)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub activity_type_id: i32,
    pub points_earned: i32,
    /// Free-form, usually JSON
    pub metadata: String,
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
        belongs_to = "super::activity_type::Entity",
        from = "Column::ActivityTypeId",
        to = "super::activity_type::Column::Id"
    )]
    ActivityType,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::activity_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserActivityRequest {
    pub user_id: i32,
    pub activity_type_id: i32,
    pub points_earned: i32,
    pub metadata: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserActivityRequest {
    #[schema(value_type = Option<i32>)]
    pub user_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub activity_type_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub points_earned: Patch<i32>,
    #[schema(value_type = Option<String>)]
    pub metadata: Patch<String>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub completed_at: Patch<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserActivityListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: i32,
    pub activity_type_id: i32,
    pub points_earned: i32,
    pub metadata: String,
    pub completed_at: String,
}

impl From<Model> for UserActivityListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user_id: model.user_id,
            activity_type_id: model.activity_type_id,
            points_earned: model.points_earned,
            metadata: model.metadata,
            completed_at: model.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserActivityResponse {
    #[serde(flatten)]
    #[schema(value_type = UserActivity)]
    pub activity: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<User>)]
    pub user: Option<user::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<ActivityType>)]
    pub activity_type: Option<activity_type::Model>,
}
