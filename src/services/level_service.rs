//! Level service - XP thresholds plus icon attachments

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, FileUpload, IconService, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::infrastructure::storage::ActiveStorage;
use crate::models::level::{
    self, CreateLevelRequest, Entity as Level, LevelListResponse, LevelResponse,
    UpdateLevelRequest, MODEL_NAME,
};

const ICON_FIELD: &str = "icon";

pub struct LevelService {
    db: DatabaseConnection,
    emitter: Emitter,
    storage: ActiveStorage,
}

impl LevelService {
    pub fn new(db: DatabaseConnection, emitter: Emitter, storage: ActiveStorage) -> Self {
        Self { db, emitter, storage }
    }

    fn live() -> Select<Level> {
        Level::find().filter(level::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<level::Model, DomainError> {
        Self::live()
            .filter(level::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Level not found");
                DomainError::NotFound
            })
    }

    async fn detail(&self, model: level::Model) -> Result<LevelResponse, DomainError> {
        let icon = self.storage.find(MODEL_NAME, model.id, ICON_FIELD).await?;
        Ok(LevelResponse { level: model, icon })
    }
}

#[async_trait]
impl CrudService for LevelService {
    type Create = CreateLevelRequest;
    type Update = UpdateLevelRequest;
    type Detail = LevelResponse;
    type ListItem = LevelListResponse;

    async fn create(&self, req: CreateLevelRequest) -> Result<LevelResponse, DomainError> {
        let now = now();
        let record = level::ActiveModel {
            level_number: Set(req.level_number),
            xp_required: Set(req.xp_required),
            title: Set(req.title),
            rewards: Set(req.rewards),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.detail(self.find_live(saved.id).await?).await?;

        tracing::info!(id = saved.id, level_number = saved.level_number, "Level created");
        self.emitter.emit("levels.create", &created);
        Ok(created)
    }

    async fn update(&self, id: i32, req: UpdateLevelRequest) -> Result<LevelResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(level_number) = req.level_number.into_option() {
            record.level_number = Set(level_number);
        }
        if let Some(xp_required) = req.xp_required.into_option() {
            record.xp_required = Set(xp_required);
        }
        if let Some(title) = req.title.into_option() {
            record.title = Set(title);
        }
        if let Some(rewards) = req.rewards.into_option() {
            record.rewards = Set(rewards);
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "Level updated");
        self.emitter.emit("levels.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.detail(self.find_live(id).await?).await?;

        if let Some(icon) = &existing.icon {
            self.storage.delete(icon).await?;
        }

        let mut record = existing.level.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Level deleted");
        self.emitter.emit("levels.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<LevelResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(&self, page: PageRequest) -> Result<PaginatedResponse<LevelListResponse>, DomainError> {
        let select = Self::live().order_by_asc(level::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let ids: Vec<i32> = items.iter().map(|l| l.id).collect();
        let mut icons = self.storage.find_many(MODEL_NAME, &ids, ICON_FIELD).await?;

        let data = items
            .into_iter()
            .map(|l| {
                let icon = icons.remove(&l.id);
                LevelListResponse::new(l, icon)
            })
            .collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}

#[async_trait]
impl IconService for LevelService {
    async fn upload_icon(&self, id: i32, file: FileUpload) -> Result<LevelResponse, DomainError> {
        let LevelResponse { level, icon: previous } = self.detail(self.find_live(id).await?).await?;

        // The old icon stays until the new one is stored
        let icon = self.storage.attach(MODEL_NAME, id, ICON_FIELD, file).await?;
        if let Some(previous) = previous {
            self.storage.delete(&previous).await?;
        }

        tracing::info!(id, attachment_id = icon.id, "Level icon uploaded");
        Ok(LevelResponse {
            level,
            icon: Some(icon),
        })
    }

    async fn remove_icon(&self, id: i32) -> Result<LevelResponse, DomainError> {
        let LevelResponse { level, icon } = self.detail(self.find_live(id).await?).await?;

        if let Some(icon) = icon {
            self.storage.delete(&icon).await?;
            tracing::info!(id, "Level icon removed");
        }

        Ok(LevelResponse { level, icon: None })
    }
}
