use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::level::{self, Entity as Level};
use crate::models::user::Entity as User;
use crate::models::user_level::{
    self, CreateUserLevelRequest, Entity as UserLevel, UpdateUserLevelRequest,
    UserLevelListResponse, UserLevelResponse,
};

/// Current level and XP per user
pub struct UserLevelService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl UserLevelService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<UserLevel> {
        UserLevel::find().filter(user_level::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<user_level::Model, DomainError> {
        Self::live()
            .filter(user_level::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "User level not found");
                DomainError::NotFound
            })
    }

    async fn detail(&self, standing: user_level::Model) -> Result<UserLevelResponse, DomainError> {
        let user = standing.find_related(User).one(&self.db).await?;
        let current_level = standing
            .find_related(Level)
            .filter(level::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(UserLevelResponse {
            standing,
            user,
            current_level,
        })
    }
}

#[async_trait]
impl CrudService for UserLevelService {
    type Create = CreateUserLevelRequest;
    type Update = UpdateUserLevelRequest;
    type Detail = UserLevelResponse;
    type ListItem = UserLevelListResponse;

    async fn create(&self, req: CreateUserLevelRequest) -> Result<UserLevelResponse, DomainError> {
        let now = now();
        let record = user_level::ActiveModel {
            user_id: Set(req.user_id),
            current_level_id: Set(req.current_level_id),
            current_xp: Set(req.current_xp),
            last_leveled_up: Set(req.last_leveled_up.to_rfc3339()),
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
            current_level_id = saved.current_level_id,
            "User level created"
        );
        self.emitter.emit("userlevels.create", &created);
        Ok(created)
    }

    async fn update(&self, id: i32, req: UpdateUserLevelRequest) -> Result<UserLevelResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(user_id) = req.user_id.into_foreign_key() {
            record.user_id = Set(user_id);
        }
        if let Some(current_level_id) = req.current_level_id.into_foreign_key() {
            record.current_level_id = Set(current_level_id);
        }
        if let Some(current_xp) = req.current_xp.into_option() {
            record.current_xp = Set(current_xp);
        }
        if let Some(last_leveled_up) = req.last_leveled_up.into_option() {
            record.last_leveled_up = Set(last_leveled_up.to_rfc3339());
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "User level updated");
        self.emitter.emit("userlevels.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "User level deleted");
        self.emitter.emit("userlevels.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<UserLevelResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(&self, page: PageRequest) -> Result<PaginatedResponse<UserLevelListResponse>, DomainError> {
        let select = Self::live().order_by_asc(user_level::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(UserLevelListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
