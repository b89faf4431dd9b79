//! Achievement service - achievement catalog plus icon attachments

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, FileUpload, IconService, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::infrastructure::storage::ActiveStorage;
use crate::models::achievement::{
    self, AchievementListResponse, AchievementResponse, CreateAchievementRequest,
    Entity as Achievement, UpdateAchievementRequest, MODEL_NAME,
};

const ICON_FIELD: &str = "icon";

pub struct AchievementService {
    db: DatabaseConnection,
    emitter: Emitter,
    storage: ActiveStorage,
}

impl AchievementService {
    pub fn new(db: DatabaseConnection, emitter: Emitter, storage: ActiveStorage) -> Self {
        Self { db, emitter, storage }
    }

    fn live() -> Select<Achievement> {
        Achievement::find().filter(achievement::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<achievement::Model, DomainError> {
        Self::live()
            .filter(achievement::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Achievement not found");
                DomainError::NotFound
            })
    }

    async fn detail(&self, model: achievement::Model) -> Result<AchievementResponse, DomainError> {
        let icon = self.storage.find(MODEL_NAME, model.id, ICON_FIELD).await?;
        Ok(AchievementResponse {
            achievement: model,
            icon,
        })
    }
}

#[async_trait]
impl CrudService for AchievementService {
    type Create = CreateAchievementRequest;
    type Update = UpdateAchievementRequest;
    type Detail = AchievementResponse;
    type ListItem = AchievementListResponse;

    async fn create(&self, req: CreateAchievementRequest) -> Result<AchievementResponse, DomainError> {
        let now = now();
        let record = achievement::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            category: Set(req.category),
            difficulty_level: Set(req.difficulty_level),
            is_hidden: Set(req.is_hidden),
            is_active: Set(req.is_active),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.detail(self.find_live(saved.id).await?).await?;

        tracing::info!(id = saved.id, name = %saved.name, "Achievement created");
        self.emitter.emit("achievements.create", &created);
        Ok(created)
    }

    async fn update(&self, id: i32, req: UpdateAchievementRequest) -> Result<AchievementResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(name) = req.name.into_option() {
            record.name = Set(name);
        }
        if let Some(description) = req.description.into_option() {
            record.description = Set(description);
        }
        if let Some(category) = req.category.into_option() {
            record.category = Set(category);
        }
        if let Some(difficulty_level) = req.difficulty_level.into_option() {
            record.difficulty_level = Set(difficulty_level);
        }
        if let Some(is_hidden) = req.is_hidden.into_option() {
            record.is_hidden = Set(is_hidden);
        }
        if let Some(is_active) = req.is_active.into_option() {
            record.is_active = Set(is_active);
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "Achievement updated");
        self.emitter.emit("achievements.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.detail(self.find_live(id).await?).await?;

        if let Some(icon) = &existing.icon {
            self.storage.delete(icon).await?;
        }

        let mut record = existing.achievement.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Achievement deleted");
        self.emitter.emit("achievements.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<AchievementResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(&self, page: PageRequest) -> Result<PaginatedResponse<AchievementListResponse>, DomainError> {
        let select = Self::live().order_by_asc(achievement::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let ids: Vec<i32> = items.iter().map(|a| a.id).collect();
        let mut icons = self.storage.find_many(MODEL_NAME, &ids, ICON_FIELD).await?;

        let data = items
            .into_iter()
            .map(|a| {
                let icon = icons.remove(&a.id);
                AchievementListResponse::new(a, icon)
            })
            .collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}

#[async_trait]
impl IconService for AchievementService {
    async fn upload_icon(&self, id: i32, file: FileUpload) -> Result<AchievementResponse, DomainError> {
        let AchievementResponse { achievement, icon: previous } = self.detail(self.find_live(id).await?).await?;

        // The old icon stays until the new one is stored
        let icon = self.storage.attach(MODEL_NAME, id, ICON_FIELD, file).await?;
        if let Some(previous) = previous {
            self.storage.delete(&previous).await?;
        }

        tracing::info!(id, attachment_id = icon.id, "Achievement icon uploaded");
        Ok(AchievementResponse {
            achievement,
            icon: Some(icon),
        })
    }

    async fn remove_icon(&self, id: i32) -> Result<AchievementResponse, DomainError> {
        let AchievementResponse { achievement, icon } = self.detail(self.find_live(id).await?).await?;

        if let Some(icon) = icon {
            self.storage.delete(&icon).await?;
            tracing::info!(id, "Achievement icon removed");
        }

        Ok(AchievementResponse { achievement, icon: None })
    }
}
