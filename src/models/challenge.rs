use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Patch;

/// A time-boxed goal with a reward.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "challenges")]
#[schema(as = Challenge)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub reward_type: String,
    pub reward_value: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_challenge::Entity")]
    UserChallenge,
}

impl Related<super::user_challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserChallenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateChallengeRequest {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reward_type: String,
    pub reward_value: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateChallengeRequest {
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub start_date: Patch<DateTime<Utc>>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub end_date: Patch<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub reward_type: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub reward_value: Patch<String>,
    #[schema(value_type = Option<bool>)]
    pub is_active: Patch<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChallengeListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub reward_type: String,
    pub reward_value: String,
    pub is_active: bool,
}

impl From<Model> for ChallengeListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            name: model.name,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            reward_type: model.reward_type,
            reward_value: model.reward_value,
            is_active: model.is_active,
        }
    }
}

pub type ChallengeResponse = Model;
