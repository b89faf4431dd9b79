use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::achievement::{self, Entity as Achievement};
use crate::models::user::Entity as User;
use crate::models::user_achievement::{
    self, CreateUserAchievementRequest, Entity as UserAchievement, UpdateUserAchievementRequest,
    UserAchievementListResponse, UserAchievementResponse,
};

/// Per-user achievement progress
pub struct UserAchievementService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl UserAchievementService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<UserAchievement> {
        UserAchievement::find().filter(user_achievement::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<user_achievement::Model, DomainError> {
        Self::live()
            .filter(user_achievement::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "User achievement not found");
                DomainError::NotFound
            })
    }

    async fn detail(
        &self,
        record: user_achievement::Model,
    ) -> Result<UserAchievementResponse, DomainError> {
        let user = record.find_related(User).one(&self.db).await?;
        let achievement = record
            .find_related(Achievement)
            .filter(achievement::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(UserAchievementResponse {
            record,
            user,
            achievement,
        })
    }
}

#[async_trait]
impl CrudService for UserAchievementService {
    type Create = CreateUserAchievementRequest;
    type Update = UpdateUserAchievementRequest;
    type Detail = UserAchievementResponse;
    type ListItem = UserAchievementListResponse;

    async fn create(
        &self,
        req: CreateUserAchievementRequest,
    ) -> Result<UserAchievementResponse, DomainError> {
        let now = now();
        let record = user_achievement::ActiveModel {
            user_id: Set(req.user_id),
            achievement_id: Set(req.achievement_id),
            progress: Set(req.progress),
            completed_at: Set(req.completed_at.to_rfc3339()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.detail(self.find_live(saved.id).await?).await?;

        tracing::info!(
            id = saved.id,
            user_id = saved.user_id,
            achievement_id = saved.achievement_id,
            "User achievement created"
        );
        self.emitter.emit("userachievements.create", &created);
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        req: UpdateUserAchievementRequest,
    ) -> Result<UserAchievementResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(user_id) = req.user_id.into_foreign_key() {
            record.user_id = Set(user_id);
        }
        if let Some(achievement_id) = req.achievement_id.into_foreign_key() {
            record.achievement_id = Set(achievement_id);
        }
        if let Some(progress) = req.progress.into_option() {
            record.progress = Set(progress);
        }
        if let Some(completed_at) = req.completed_at.into_option() {
            record.completed_at = Set(completed_at.to_rfc3339());
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "User achievement updated");
        self.emitter.emit("userachievements.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "User achievement deleted");
        self.emitter.emit("userachievements.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<UserAchievementResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<UserAchievementListResponse>, DomainError> {
        let select = Self::live().order_by_asc(user_achievement::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(UserAchievementListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
