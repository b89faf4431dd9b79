use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{leaderboard, user};
use crate::domain::Patch;

/// A user's score and rank on a leaderboard for one period.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "leaderboardentries")]
#[schema(as = LeaderboardEntry)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub leaderboard_id: i32,
    pub user_id: i32,
    pub score: i32,
    pub rank: i32,
    pub period_start: String,
    pub period_end: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leaderboard::Entity",
        from = "Column::LeaderboardId",
        to = "super::leaderboard::Column::Id"
    )]
    Leaderboard,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::leaderboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leaderboard.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLeaderboardEntryRequest {
    pub leaderboard_id: i32,
    pub user_id: i32,
    pub score: i32,
    pub rank: i32,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateLeaderboardEntryRequest {
    #[schema(value_type = Option<i32>)]
    pub leaderboard_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub user_id: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub score: Patch<i32>,
    #[schema(value_type = Option<i32>)]
    pub rank: Patch<i32>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub period_start: Patch<DateTime<Utc>>,
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub period_end: Patch<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntryListResponse {
    pub id: i32,
    pub created_at: String,
    pub updated_at: String,
    pub leaderboard_id: i32,
    pub user_id: i32,
    pub score: i32,
    pub rank: i32,
    pub period_start: String,
    pub period_end: String,
}

impl From<Model> for LeaderboardEntryListResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            leaderboard_id: model.leaderboard_id,
            user_id: model.user_id,
            score: model.score,
            rank: model.rank,
            period_start: model.period_start,
            period_end: model.period_end,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntryResponse {
    #[serde(flatten)]
    #[schema(value_type = LeaderboardEntry)]
    pub entry: Model,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Leaderboard>)]
    pub leaderboard: Option<leaderboard::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<User>)]
    pub user: Option<user::Model>,
}
