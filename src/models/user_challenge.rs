use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{challenge, user};
use crate::domain::Patch;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "userchallenges")]
#[schema(as = UserChallenge)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub challenge_id: i32,
    pub progress: i32,
    pub completed_at: String,
    pub reward_claimed: bool,
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
        belongs_to = "super::challenge::Entity",
        from = "Column::ChallengeId",
        to = "super::challenge::Column::Id"
    )]
    Challenge,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Challenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserChallengeRequest {
    pub user_id: i32,
    pub challenge_id: i32,
    pub progress: i32,
    pub completed_at: DateTime<Utc>,
    pub reward_claimed: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserChallengeRequest {
    #[schema(value_type = Option<i32>)]
    pub user_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub challenge_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub progress: Patch<i32>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub completed_at: Patch<DateTime<Utc>>,
    #[schema(value_type = Option<bool>)]
    pub reward_claimed: Patch<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserChallengeListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: i32,
    pub challenge_id: i32,
    pub progress: i32,
    pub completed_at: String,
    pub reward_claimed: bool,
}

impl From<Model> for UserChallengeListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            user_id: model.user_id,
            challenge_id: model.challenge_id,
            progress: model.progress,
            completed_at: model.completed_at,
            reward_claimed: model.reward_claimed,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserChallengeResponse {
    #[serde(flatten)]
    #[schema(value_type = UserChallenge)]
    pub participation: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<User>)]
    pub user: Option<user::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Challenge>)]
    pub challenge: Option<challenge::Model>,
}
