use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::challenge::{self, Entity as Challenge};
use crate::models::user::Entity as User;
use crate::models::user_challenge::{
    self, CreateUserChallengeRequest, Entity as UserChallenge, UpdateUserChallengeRequest,
    UserChallengeListResponse, UserChallengeResponse,
};

/// Challenge participation and reward claims
pub struct UserChallengeService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl UserChallengeService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<UserChallenge> {
        UserChallenge::find().filter(user_challenge::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<user_challenge::Model, DomainError> {
        Self::live()
            .filter(user_challenge::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "User challenge not found");
                DomainError::NotFound
            })
    }

    async fn detail(
        &self,
        participation: user_challenge::Model,
    ) -> Result<UserChallengeResponse, DomainError> {
        let user = participation.find_related(User).one(&self.db).await?;
        let challenge = participation
            .find_related(Challenge)
            .filter(challenge::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(UserChallengeResponse {
            participation,
            user,
            challenge,
        })
    }
}

#[async_trait]
impl CrudService for UserChallengeService {
    type Create = CreateUserChallengeRequest;
    type Update = UpdateUserChallengeRequest;
    type Detail = UserChallengeResponse;
    type ListItem = UserChallengeListResponse;

    async fn create(&self, req: CreateUserChallengeRequest) -> Result<UserChallengeResponse, DomainError> {
        let now = now();
        let record = user_challenge::ActiveModel {
            user_id: Set(req.user_id),
            challenge_id: Set(req.challenge_id),
            progress: Set(req.progress),
            completed_at: Set(req.completed_at.to_rfc3339()),
            reward_claimed: Set(req.reward_claimed),
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
            challenge_id = saved.challenge_id,
            "User challenge created"
        );
        self.emitter.emit("userchallenges.create", &created);
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        req: UpdateUserChallengeRequest,
    ) -> Result<UserChallengeResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(user_id) = req.user_id.into_foreign_key() {
            record.user_id = Set(user_id);
        }
        if let Some(challenge_id) = req.challenge_id.into_foreign_key() {
            record.challenge_id = Set(challenge_id);
        }
        if let Some(progress) = req.progress.into_option() {
            record.progress = Set(progress);
        }
        if let Some(completed_at) = req.completed_at.into_option() {
            record.completed_at = Set(completed_at.to_rfc3339());
        }
        if let Some(reward_claimed) = req.reward_claimed.into_option() {
            record.reward_claimed = Set(reward_claimed);
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "User challenge updated");
        self.emitter.emit("userchallenges.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "User challenge deleted");
        self.emitter.emit("userchallenges.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<UserChallengeResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<UserChallengeListResponse>, DomainError> {
        let select = Self::live().order_by_asc(user_challenge::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(UserChallengeListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}
