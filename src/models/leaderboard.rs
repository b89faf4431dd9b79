use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Patch;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "leaderboards")]
#[schema(as = Leaderboard)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub r#type: String,
    pub period: String,
    pub reset_frequency: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::leaderboard_entry::Entity")]
    LeaderboardEntry,
}

impl Related<super::leaderboard_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaderboardEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLeaderboardRequest {
    pub name: String,
    pub r#type: String,
    pub period: String,
    pub reset_frequency: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateLeaderboardRequest {
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub r#type: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub period: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub reset_frequency: Patch<String>,
    #[schema(value_type = Option<bool>)]
    pub is_active: Patch<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub r#type: String,
    pub period: String,
    pub reset_frequency: String,
    pub is_active: bool,
}

impl From<Model> for LeaderboardListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            name: model.name,
            r#type: model.r#type,
            period: model.period,
            reset_frequency: model.reset_frequency,
            is_active: model.is_active,
        }
    }
}

pub type LeaderboardResponse = Model;
