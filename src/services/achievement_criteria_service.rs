//! Achievement criteria service - "do activity X, N times, within T"

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::{fetch_page, now};
use crate::domain::{CrudService, DomainError, PageRequest, PaginatedResponse};
use crate::infrastructure::emitter::Emitter;
use crate::models::achievement::{self, Entity as Achievement};
use crate::models::achievement_criteria::{
    self, AchievementCriteriaListResponse, AchievementCriteriaResponse,
    CreateAchievementCriteriaRequest, Entity as AchievementCriteria,
    UpdateAchievementCriteriaRequest,
};
use crate::models::activity_type::{self, Entity as ActivityType};

pub struct AchievementCriteriaService {
    db: DatabaseConnection,
    emitter: Emitter,
}

impl AchievementCriteriaService {
    pub fn new(db: DatabaseConnection, emitter: Emitter) -> Self {
        Self { db, emitter }
    }

    fn live() -> Select<AchievementCriteria> {
        AchievementCriteria::find().filter(achievement_criteria::Column::DeletedAt.is_null())
    }

    async fn find_live(&self, id: i32) -> Result<achievement_criteria::Model, DomainError> {
        Self::live()
            .filter(achievement_criteria::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id, "Achievement criteria not found");
                DomainError::NotFound
            })
    }

    async fn detail(
        &self,
        criteria: achievement_criteria::Model,
    ) -> Result<AchievementCriteriaResponse, DomainError> {
        let achievement = criteria
            .find_related(Achievement)
            .filter(achievement::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        let activity_type = criteria
            .find_related(ActivityType)
            .filter(activity_type::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(AchievementCriteriaResponse {
            criteria,
            achievement,
            activity_type,
        })
    }
}

#[async_trait]
impl CrudService for AchievementCriteriaService {
    type Create = CreateAchievementCriteriaRequest;
    type Update = UpdateAchievementCriteriaRequest;
    type Detail = AchievementCriteriaResponse;
    type ListItem = AchievementCriteriaListResponse;

    async fn create(
        &self,
        req: CreateAchievementCriteriaRequest,
    ) -> Result<AchievementCriteriaResponse, DomainError> {
        let now = now();
        let record = achievement_criteria::ActiveModel {
            achievement_id: Set(req.achievement_id),
            activity_type_id: Set(req.activity_type_id),
            required_count: Set(req.required_count),
            time_frame: Set(req.time_frame),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let saved = record.insert(&self.db).await?;
        let created = self.detail(self.find_live(saved.id).await?).await?;

        tracing::info!(
            id = saved.id,
            achievement_id = saved.achievement_id,
            activity_type_id = saved.activity_type_id,
            "Achievement criteria created"
        );
        self.emitter.emit("achievementcriteria.create", &created);
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        req: UpdateAchievementCriteriaRequest,
    ) -> Result<AchievementCriteriaResponse, DomainError> {
        let mut record = self.find_live(id).await?.into_active_model();

        if let Some(achievement_id) = req.achievement_id.into_foreign_key() {
            record.achievement_id = Set(achievement_id);
        }
        if let Some(activity_type_id) = req.activity_type_id.into_foreign_key() {
            record.activity_type_id = Set(activity_type_id);
        }
        if let Some(required_count) = req.required_count.into_option() {
            record.required_count = Set(required_count);
        }
        if let Some(time_frame) = req.time_frame.into_option() {
            record.time_frame = Set(time_frame);
        }
        record.updated_at = Set(now());

        let updated = self.detail(record.update(&self.db).await?).await?;

        tracing::info!(id, "Achievement criteria updated");
        self.emitter.emit("achievementcriteria.update", &updated);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let existing = self.find_live(id).await?;

        let mut record = existing.clone().into_active_model();
        record.deleted_at = Set(Some(now()));
        record.update(&self.db).await?;

        tracing::info!(id, "Achievement criteria deleted");
        self.emitter.emit("achievementcriteria.delete", &existing);
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<AchievementCriteriaResponse, DomainError> {
        let model = self.find_live(id).await?;
        self.detail(model).await
    }

    async fn get_all(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AchievementCriteriaListResponse>, DomainError> {
        let select = Self::live().order_by_asc(achievement_criteria::Column::Id);
        let (items, total) = fetch_page(&self.db, select, page).await?;

        let data = items
            .into_iter()
            .map(AchievementCriteriaListResponse::from)
            .collect();
        Ok(PaginatedResponse::new(data, total, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Patch;
    use crate::infrastructure::db::init_db;
    use crate::modules::migrate_all;

    async fn seeded() -> (AchievementCriteriaService, i32, i32) {
        let db = init_db("sqlite::memory:").await.unwrap();
        migrate_all(&db).await.unwrap();

        let now = now();
        let achievement = achievement::ActiveModel {
            name: Set("Marathoner".to_string()),
            description: Set("Run ten times".to_string()),
            category: Set("fitness".to_string()),
            difficulty_level: Set(3),
            is_hidden: Set(false),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let run = activity_type::ActiveModel {
            name: Set("Run".to_string()),
            description: Set("Log a run".to_string()),
            category: Set("fitness".to_string()),
            points_value: Set(20),
            cooldown_period: Set(0),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        (
            AchievementCriteriaService::new(db, Emitter::new()),
            achievement.id,
            run.id,
        )
    }

    #[tokio::test]
    async fn detail_embeds_related_catalog_rows() {
        let (service, achievement_id, activity_type_id) = seeded().await;

        let created = service
            .create(CreateAchievementCriteriaRequest {
                achievement_id,
                activity_type_id,
                required_count: 10,
                time_frame: 30,
            })
            .await
            .unwrap();

        assert_eq!(created.achievement.as_ref().map(|a| a.name.as_str()), Some("Marathoner"));
        assert_eq!(created.activity_type.as_ref().map(|a| a.points_value), Some(20));
    }

    #[tokio::test]
    async fn zero_foreign_key_leaves_link_unchanged() {
        let (service, achievement_id, activity_type_id) = seeded().await;
        let created = service
            .create(CreateAchievementCriteriaRequest {
                achievement_id,
                activity_type_id,
                required_count: 10,
                time_frame: 30,
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.criteria.id,
                UpdateAchievementCriteriaRequest {
                    achievement_id: Patch::Set(0),
                    required_count: Patch::Set(12),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.criteria.achievement_id, achievement_id);
        assert_eq!(updated.criteria.required_count, 12);
    }
}
