use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::leaderboard::{
    self, CreateLeaderboardRequest, Entity as Leaderboard, LeaderboardListResponse,
    LeaderboardResponse, UpdateLeaderboardRequest,
};

pub struct LeaderboardService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl LeaderboardService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<Leaderboard> {
        Leaderboard::find().filter(leaderboard::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<leaderboard::Model, DomainError> {
        Self::live()
            .filter(leaderboard::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Leaderboard not found");
                DomainError::NotFound
            })
    }
}

#[async_trait]
impl CrudService for LeaderboardService {
    type Create = CreateLeaderboardRequest;
    type Update = UpdateLeaderboardRequest;
    type Detail = LeaderboardResponse;
    type ListItem = LeaderboardListResponse;

    async fn create(&self, req: CreateLeaderboardRequest) -> Result<LeaderboardResponse, DomainError> {
        let now = now();
        let record = leaderboard::ActiveModel {
            name: Set(req.name),
            r#type: Set(req.r#type),
            period: Set(req.period),
            reset_frequency: Set(req.reset_frequency),
            is_active: Set(req.is_active),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.find_live(saved.id).await?;

        tracing::info!(id = created.id, name = %created.name, "Leaderboard created");
        self.emitter.emit("leaderboards.create", &created);
        Ok(created)
    }

    async fn update(&self, id: i32, req: UpdateLeaderboardRequest) -> Result<LeaderboardResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(name) = req.name.into_option() {
            record.name = Set(name);
        }
        if let Some(kind) = req.r#type.into_option() {
            record.r#type = Set(kind);
        }
        if let Some(period) = req.period.into_option() {
            record.period = Set(period);
        }
        if let Some(reset_frequency) = req.reset_frequency.into_option() {
            record.reset_frequency = Set(reset_frequency);
        }
        if let Some(is_active) = req.is_active.into_option() {
            record.is_active = Set(is_active);
        }
        record.updated_at = Set(now());

        let updated = record.update(&self.db).await?;

        tracing::info!(id, "Leaderboard updated");
        self.emitter.emit("leaderboards.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Leaderboard deleted");
        self.emitter.emit("leaderboards.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<LeaderboardResponse, DomainError> {
        self.find_live(id).await
    }

    async fn get_all(&self, page: PageRequest) -> Result<PaginatedResponse<LeaderboardListResponse>, DomainError> {
        let select = Self::live().order_by_asc(leaderboard::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(LeaderboardListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
