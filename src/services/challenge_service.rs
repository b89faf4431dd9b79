//! Challenge service - time-boxed goals with a reward

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::challenge::{
    self, ChallengeListResponse, ChallengeResponse, CreateChallengeRequest, Entity as Challenge,
    UpdateChallengeRequest,
};

pub struct ChallengeService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl ChallengeService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<Challenge> {
        Challenge::find().filter(challenge::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<challenge::Model, DomainError> {
        Self::live()
            .filter(challenge::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Challenge not found");
                DomainError::NotFound
            })
    }
}

#[async_trait]
impl CrudService for ChallengeService {
    type Create = CreateChallengeRequest;
    type Update = UpdateChallengeRequest;
    type Detail = ChallengeResponse;
    type ListItem = ChallengeListResponse;

    async fn create(&self, req: CreateChallengeRequest) -> Result<ChallengeResponse, DomainError> {
        let now = now();
        let record = challenge::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            start_date: Set(req.start_date.to_rfc3339()),
            end_date: Set(req.end_date.to_rfc3339()),
            reward_type: Set(req.reward_type),
            reward_value: Set(req.reward_value),
            is_active: Set(req.is_active),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.find_live(saved.id).await?;

        tracing::info!(id = created.id, name = %created.name, "Challenge created");
        self.emitter.emit("challenges.create", &created);
        Ok(created)
    }

    async fn update(&self, id: i32, req: UpdateChallengeRequest) -> Result<ChallengeResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(name) = req.name.into_option() {
            record.name = Set(name);
        }
        if let Some(description) = req.description.into_option() {
            record.description = Set(description);
        }
        if let Some(start_date) = req.start_date.into_option() {
            record.start_date = Set(start_date.to_rfc3339());
        }
        if let Some(end_date) = req.end_date.into_option() {
            record.end_date = Set(end_date.to_rfc3339());
        }
        if let Some(reward_type) = req.reward_type.into_option() {
            record.reward_type = Set(reward_type);
        }
        if let Some(reward_value) = req.reward_value.into_option() {
            record.reward_value = Set(reward_value);
        }
        if let Some(is_active) = req.is_active.into_option() {
            record.is_active = Set(is_active);
        }
        record.updated_at = Set(now());

        let updated = record.update(&self.db).await?;

        tracing::info!(id, "Challenge updated");
        self.emitter.emit("challenges.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Challenge deleted");
        self.emitter.emit("challenges.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<ChallengeResponse, DomainError> {
        self.find_live(id).await
    }

    async fn get_all(&self, page: PageRequest) -> Result<PaginatedResponse<ChallengeListResponse>, DomainError> {
        let select = Self::live().order_by_asc(challenge::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items.into_iter().map(ChallengeListResponse::from).collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Patch;
    use crate::infrastructure::db::init_db;
    use crate::modules::migrate_all;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn dates_are_stored_as_rfc3339() {
        let db = init_db("sqlite::memory:").await.unwrap();
        migrate_all(&db).await.unwrap();
        let service = ChallengeService::new(db, Emitter::new());

        let created = service
            .create(CreateChallengeRequest {
                name: "Spring sprint".to_string(),
                description: "Ten workouts in March".to_string(),
                start_date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap(),
                reward_type: "badge".to_string(),
                reward_value: "spring-2024".to_string(),
                is_active: true,
            })
            .await
            .unwrap();
        assert_eq!(created.start_date, "2024-03-01T00:00:00+00:00");

        let moved = service
            .update(
                created.id,
                UpdateChallengeRequest {
                    end_date: Patch::Set(Utc.with_ymd_and_hms(2024, 4, 7, 12, 0, 0).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.end_date, "2024-04-07T12:00:00+00:00");
        assert_eq!(moved.start_date, created.start_date);
    }
}
