//! Activity type service - catalog of rewardable actions

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::activity_type::{
    self, ActivityTypeListResponse, ActivityTypeResponse, CreateActivityTypeRequest,
    Entity as ActivityType, UpdateActivityTypeRequest,
};

pub struct ActivityTypeService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl ActivityTypeService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<ActivityType> {
        ActivityType::find().filter(activity_type::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<activity_type::Model, DomainError> {
        Self::live()
            .filter(activity_type::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Activity type not found");
                DomainError::NotFound
            })
    }
}

#[async_trait]
impl CrudService for ActivityTypeService {
    type Create = CreateActivityTypeRequest;
    type Update = UpdateActivityTypeRequest;
    type Detail = ActivityTypeResponse;
    type ListItem = ActivityTypeListResponse;

    async fn create(&self, req: CreateActivityTypeRequest) -> Result<ActivityTypeResponse, DomainError> {
        let now = now();
        let record = activity_type::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            category: Set(req.category),
            points_value: Set(req.points_value),
            cooldown_period: Set(req.cooldown_period),
            is_active: Set(req.is_active),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.find_live(saved.id).await?;

        tracing::info!(id = created.id, name = %created.name, "Activity type created");
        self.emitter.emit("activitytypes.create", &created);
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        req: UpdateActivityTypeRequest,
    ) -> Result<ActivityTypeResponse, DomainError> {
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
        if let Some(points_value) = req.points_value.into_option() {
            record.points_value = Set(points_value);
        }
        if let Some(cooldown_period) = req.cooldown_period.into_option() {
            record.cooldown_period = Set(cooldown_period);
        }
        if let Some(is_active) = req.is_active.into_option() {
            record.is_active = Set(is_active);
        }
        record.updated_at = Set(now());

        let updated = record.update(&self.db).await?;

        tracing::info!(id, "Activity type updated");
        self.emitter.emit("activitytypes.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Activity type deleted");
        self.emitter.emit("activitytypes.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<ActivityTypeResponse, DomainError> {
        self.find_live(id).await
    }

    async fn get_all(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ActivityTypeListResponse>, DomainError> {
        let select = Self::live().order_by_asc(activity_type::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(ActivityTypeListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
