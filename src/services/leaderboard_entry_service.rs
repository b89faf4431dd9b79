//! Leaderboard entry service - a user's score and rank for one period

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::leaderboard::{self, Entity as Leaderboard};
use crate::models::leaderboard_entry::{
    self, CreateLeaderboardEntryRequest, Entity as LeaderboardEntry,
    LeaderboardEntryListResponse, LeaderboardEntryResponse, UpdateLeaderboardEntryRequest,
};
use crate::models::user::Entity as User;

pub struct LeaderboardEntryService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl LeaderboardEntryService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<LeaderboardEntry> {
        LeaderboardEntry::find().filter(leaderboard_entry::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<leaderboard_entry::Model, DomainError> {
        Self::live()
            .filter(leaderboard_entry::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Leaderboard entry not found");
                DomainError::NotFound
            })
    }

    async fn detail(
        &self,
        entry: leaderboard_entry::Model,
    ) -> Result<LeaderboardEntryResponse, DomainError> {
        let leaderboard = entry
            .find_related(Leaderboard)
            .filter(leaderboard::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        let user = entry.find_related(User).one(&self.db).await?;

        Ok(LeaderboardEntryResponse {
            entry,
            leaderboard,
            user,
        })
    }
}

#[async_trait]
impl CrudService for LeaderboardEntryService {
    type Create = CreateLeaderboardEntryRequest;
    type Update = UpdateLeaderboardEntryRequest;
    type Detail = LeaderboardEntryResponse;
    type ListItem = LeaderboardEntryListResponse;

    async fn create(
        &self,
        req: CreateLeaderboardEntryRequest,
    ) -> Result<LeaderboardEntryResponse, DomainError> {
        let now = now();
        let record = leaderboard_entry::ActiveModel {
            leaderboard_id: Set(req.leaderboard_id),
            user_id: Set(req.user_id),
            score: Set(req.score),
            rank: Set(req.rank),
            period_start: Set(req.period_start.to_rfc3339()),
            period_end: Set(req.period_end.to_rfc3339()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.detail(self.find_live(saved.id).await?).await?;

        tracing::info!(
            id = saved.id,
            leaderboard_id = saved.leaderboard_id,
            user_id = saved.user_id,
            "Leaderboard entry created"
        );
        self.emitter.emit("leaderboardentries.create", &created);
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        req: UpdateLeaderboardEntryRequest,
    ) -> Result<LeaderboardEntryResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(leaderboard_id) = req.leaderboard_id.into_foreign_key() {
            record.leaderboard_id = Set(leaderboard_id);
        }
        if let Some(user_id) = req.user_id.into_foreign_key() {
            record.user_id = Set(user_id);
        }
        if let Some(score) = req.score.into_option() {
            record.score = Set(score);
        }
        if let Some(rank) = req.rank.into_option() {
            record.rank = Set(rank);
        }
        if let Some(period_start) = req.period_start.into_option() {
            record.period_start = Set(period_start.to_rfc3339());
        }
        if let Some(period_end) = req.period_end.into_option() {
            record.period_end = Set(period_end.to_rfc3339());
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "Leaderboard entry updated");
        self.emitter.emit("leaderboardentries.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Leaderboard entry deleted");
        self.emitter.emit("leaderboardentries.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<LeaderboardEntryResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<LeaderboardEntryListResponse>, DomainError> {
        let select = Self::live().order_by_asc(leaderboard_entry::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items
            .into_iter()
            .map(LeaderboardEntryListResponse::from)
            .collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
