use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Patch;

/// A currency users accumulate (XP, coins, karma...)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "pointtypes")]
#[schema(as = PointType)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Icon identifier or URL; point types carry no uploaded attachment
    pub icon: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_point::Entity")]
    UserPoint,
}

impl Related<super::user_point::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserPoint.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePointTypeRequest {
    pub name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdatePointTypeRequest {
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub icon: Patch<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PointTypeListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<Model> for PointTypeListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            name: model.name,
            description: model.description,
            icon: model.icon,
        }
    }
}

pub type PointTypeResponse = Model;
