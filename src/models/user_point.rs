use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{point_type, user};
use crate::domain::Patch;

/// A user's balance in one point type.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "userpoints")]
#[schema(as = UserPoint)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub point_type_id: i32,
    pub current_balance: i32,
    pub lifetime_earned: i32,
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
        belongs_to = "super::point_type::Entity",
        from = "Column::PointTypeId",
        to = "super::point_type::Column::Id"
    )]
    PointType,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::point_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PointType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserPointRequest {
    pub user_id: i32,
    pub point_type_id: i32,
    pub current_balance: i32,
    pub lifetime_earned: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserPointRequest {
    #[schema(value_type = Option<i32>)]
    pub user_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub point_type_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub current_balance: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub lifetime_earned: Patch<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserPointListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: i32,
    pub point_type_id: i32,
    pub current_balance: i32,
    pub lifetime_earned: i32,
}

impl From<Model> for UserPointListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user_id: model.user_id,
            point_type_id: model.point_type_id,
            current_balance: model.current_balance,
            lifetime_earned: model.lifetime_earned,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserPointResponse {
    #[serde(flatten)]
    #[schema(value_type = UserPoint)]
    pub balance: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<User>)]
    pub user: Option<user::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<PointType>)]
    pub point_type: Option<point_type::Model>,
}
