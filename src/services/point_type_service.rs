//! Point type service - point currencies (XP, coins, ...)

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::point_type::{
    self, CreatePointTypeRequest, Entity as PointType, PointTypeListResponse, PointTypeResponse,
    UpdatePointTypeRequest,
};

pub struct PointTypeService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl PointTypeService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<PointType> {
        PointType::find().filter(point_type::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<point_type::Model, DomainError> {
        Self::live()
            .filter(point_type::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Point type not found");
                DomainError::NotFound
            })
    }
}

#[async_trait]
impl CrudService for PointTypeService {
    type Create = CreatePointTypeRequest;
    type Update = UpdatePointTypeRequest;
    type Detail = PointTypeResponse;
    type ListItem = PointTypeListResponse;

    async fn create(&self, req: CreatePointTypeRequest) -> Result<PointTypeResponse, DomainError> {
        let now = now();
        let record = point_type::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            icon: Set(req.icon),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.find_live(saved.id).await?;

        tracing::info!(id = created.id, name = %created.name, "Point type created");
        self.emitter.emit("pointtypes.create", &created);
        Ok(created)
    }

    async fn update(&self, id: i32, req: UpdatePointTypeRequest) -> Result<PointTypeResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(name) = req.name.into_option() {
            record.name = Set(name);
        }
        if let Some(description) = req.description.into_option() {
            record.description = Set(description);
        }
        if let Some(icon) = req.icon.into_option() {
            record.icon = Set(icon);
        }
        record.updated_at = Set(now());

        let updated = record.update(&self.db).await?;

        tracing::info!(id, "Point type updated");
        self.emitter.emit("pointtypes.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Point type deleted");
        self.emitter.emit("pointtypes.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<PointTypeResponse, DomainError> {
        self.find_live(id).await
    }

    async fn get_all(&self, page: PageRequest) -> Result<PaginatedResponse<PointTypeListResponse>, DomainError> {
        let select = Self::live().order_by_asc(point_type::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(PointTypeListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
