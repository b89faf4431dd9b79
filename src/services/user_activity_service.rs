//! User activity service - the per-user activity log

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::activity_type::{self, Entity as ActivityType};
use crate::models::user::Entity as User;
use crate::models::user_activity::{
    self, CreateUserActivityRequest, Entity as UserActivity, UpdateUserActivityRequest,
    UserActivityListResponse, UserActivityResponse,
};

pub struct UserActivityService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl UserActivityService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<UserActivity> {
        UserActivity::find().filter(user_activity::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<user_activity::Model, DomainError> {
        Self::live()
            .filter(user_activity::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "User activity not found");
                DomainError::NotFound
            })
    }

    async fn detail(&self, activity: user_activity::Model) -> Result<UserActivityResponse, DomainError> {
        let user = activity.find_related(User).one(&self.db).await?;
        let activity_type = activity
            .find_related(ActivityType)
            .filter(activity_type::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(UserActivityResponse {
            activity,
            user,
            activity_type,
        })
    }
}

#[async_trait]
impl CrudService for UserActivityService {
    type Create = CreateUserActivityRequest;
    type Update = UpdateUserActivityRequest;
    type Detail = UserActivityResponse;
    type ListItem = UserActivityListResponse;

    async fn create(&self, req: CreateUserActivityRequest) -> Result<UserActivityResponse, DomainError> {
        let now = now();
        let record = user_activity::ActiveModel {
            user_id: Set(req.user_id),
            activity_type_id: Set(req.activity_type_id),
            points_earned: Set(req.points_earned),
            metadata: Set(req.metadata),
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
            activity_type_id = saved.activity_type_id,
            "User activity recorded"
        );
        self.emitter.emit("useractivities.create", &created);
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        req: UpdateUserActivityRequest,
    ) -> Result<UserActivityResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(user_id) = req.user_id.into_foreign_key() {
            record.user_id = Set(user_id);
        }
        if let Some(activity_type_id) = req.activity_type_id.into_foreign_key() {
            record.activity_type_id = Set(activity_type_id);
        }
        if let Some(points_earned) = req.points_earned.into_option() {
            record.points_earned = Set(points_earned);
        }
        if let Some(metadata) = req.metadata.into_option() {
            record.metadata = Set(metadata);
        }
        if let Some(completed_at) = req.completed_at.into_option() {
            record.completed_at = Set(completed_at.to_rfc3339());
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "User activity updated");
        self.emitter.emit("useractivities.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "User activity deleted");
        self.emitter.emit("useractivities.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<UserActivityResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<UserActivityListResponse>, DomainError> {
        let select = Self::live().order_by_asc(user_activity::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(UserActivityListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
