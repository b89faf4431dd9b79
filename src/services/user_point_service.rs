use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::point_type::{self, Entity as PointType};
use crate::models::user::Entity as User;
use crate::models::user_point::{
    self, CreateUserPointRequest, Entity as UserPoint, UpdateUserPointRequest,
    UserPointListResponse, UserPointResponse,
};

/// Point balances, one row per user and point type
pub struct UserPointService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl UserPointService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<UserPoint> {
        UserPoint::find().filter(user_point::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<user_point::Model, DomainError> {
        Self::live()
            .filter(user_point::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "User points not found");
                DomainError::NotFound
            })
    }

    async fn detail(&self, balance: user_point::Model) -> Result<UserPointResponse, DomainError> {
        let user = balance.find_related(User).one(&self.db).await?;
        let point_type = balance
            .find_related(PointType)
            .filter(point_type::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(UserPointResponse {
            balance,
            user,
            point_type,
        })
    }
}

#[async_trait]
impl CrudService for UserPointService {
    type Create = CreateUserPointRequest;
    type Update = UpdateUserPointRequest;
    type Detail = UserPointResponse;
    type ListItem = UserPointListResponse;

    async fn create(&self, req: CreateUserPointRequest) -> Result<UserPointResponse, DomainError> {
        let now = now();
        let record = user_point::ActiveModel {
            user_id: Set(req.user_id),
            point_type_id: Set(req.point_type_id),
            current_balance: Set(req.current_balance),
            lifetime_earned: Set(req.lifetime_earned),
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
            point_type_id = saved.point_type_id,
            "User points created"
        );
        self.emitter.emit("userpoints.create", &created);
        Ok(created)
    }

    async fn update(&self, id: i32, req: UpdateUserPointRequest) -> Result<UserPointResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(user_id) = req.user_id.into_foreign_key() {
            record.user_id = Set(user_id);
        }
        if let Some(point_type_id) = req.point_type_id.into_foreign_key() {
            record.point_type_id = Set(point_type_id);
        }
        if let Some(current_balance) = req.current_balance.into_option() {
            record.current_balance = Set(current_balance);
        }
        if let Some(lifetime_earned) = req.lifetime_earned.into_option() {
            record.lifetime_earned = Set(lifetime_earned);
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "User points updated");
        self.emitter.emit("userpoints.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "User points deleted");
        self.emitter.emit("userpoints.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<UserPointResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(&self, page: PageRequest) -> Result<PaginatedResponse<UserPointListResponse>, DomainError> {
        let select = Self::live().order_by_asc(user_point::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(UserPointListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
