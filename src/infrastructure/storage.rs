//! Local-filesystem attachment storage.
//!
//! Files live under `{root}/{model_type}/{model_id}/{uuid}.{ext}` and are
//! tracked in the `attachments` table so any model can own them.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainError, FileUpload};
use crate::infrastructure::config::StorageConfig;
use crate::models::attachment::{self, Entity as Attachment};

#[derive(Clone)]
pub struct ActiveStorage {
    db: DatabaseConnection,
    config: StorageConfig,
}

impl ActiveStorage {
    pub fn new(db: DatabaseConnection, config: StorageConfig) -> Self {
        Self { db, config }
    }

    pub fn root(&self) -> &Path {
        &self.config.path
    }

    /// Absolute location of an attachment's file
    pub fn file_path(&self, attachment: &attachment::Model) -> PathBuf {
        self.config.path.join(&attachment.path)
    }

    /// Store `upload` and link it to `(model_type, model_id, field)`.
    pub async fn attach(
        &self,
        model_type: &str,
        model_id: i32,
        field: &str,
        upload: FileUpload,
    ) -> Result<attachment::Model, DomainError> {
        if upload.data.is_empty() {
            tracing::warn!(model_type, model_id, field, "Rejected empty upload");
            return Err(DomainError::Validation("Uploaded file is empty".to_string()));
        }
        if upload.data.len() > self.config.max_upload_bytes {
            tracing::warn!(
                model_type,
                model_id,
                size = upload.data.len(),
                "Rejected oversized upload"
            );
            return Err(DomainError::Validation(format!(
                "File exceeds the {} byte upload limit",
                self.config.max_upload_bytes
            )));
        }

        let stored_name = match extension_of(&upload.filename) {
            Some(ext) => format!("{}.{}", uuid::Uuid::new_v4(), ext),
            None => uuid::Uuid::new_v4().to_string(),
        };
        let relative = format!("{}/{}/{}", model_type, model_id, stored_name);
        let full_path = self.config.path.join(&relative);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, &upload.data).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let record = attachment::ActiveModel {
            model_type: Set(model_type.to_string()),
            model_id: Set(model_id),
            field: Set(field.to_string()),
            filename: Set(upload.filename),
            path: Set(relative.clone()),
            url: Set(format!("{}/{}", self.config.base_url, relative)),
            content_type: Set(upload.content_type),
            size: Set(upload.data.len() as i64),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        match record.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) => {
                // Don't leave an orphaned file behind
                let _ = tokio::fs::remove_file(&full_path).await;
                Err(e.into())
            }
        }
    }

    pub async fn find(
        &self,
        model_type: &str,
        model_id: i32,
        field: &str,
    ) -> Result<Option<attachment::Model>, DomainError> {
        let found = Attachment::find()
            .filter(attachment::Column::ModelType.eq(model_type))
            .filter(attachment::Column::ModelId.eq(model_id))
            .filter(attachment::Column::Field.eq(field))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    /// Attachments for a batch of owners, keyed by owner id
    pub async fn find_many(
        &self,
        model_type: &str,
        model_ids: &[i32],
        field: &str,
    ) -> Result<HashMap<i32, attachment::Model>, DomainError> {
        if model_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = Attachment::find()
            .filter(attachment::Column::ModelType.eq(model_type))
            .filter(attachment::Column::ModelId.is_in(model_ids.iter().copied()))
            .filter(attachment::Column::Field.eq(field))
            .all(&self.db)
            .await?;

        Ok(found.into_iter().map(|a| (a.model_id, a)).collect())
    }

    /// Remove the file and its record. A file already gone from disk is not an error.
    pub async fn delete(&self, attachment: &attachment::Model) -> Result<(), DomainError> {
        match tokio::fs::remove_file(self.file_path(attachment)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    attachment_id = attachment.id,
                    path = %attachment.path,
                    "attachment file already missing"
                );
            }
            Err(e) => return Err(e.into()),
        }

        Attachment::delete_by_id(attachment.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

/// Lower-cased alphanumeric extension of a client-supplied filename
fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::init_db;

    async fn storage_in_temp_dir(max_upload_bytes: usize) -> ActiveStorage {
        let db = init_db("sqlite::memory:").await.unwrap();
        let config = StorageConfig {
            path: std::env::temp_dir().join(format!("gamification-storage-{}", uuid::Uuid::new_v4())),
            base_url: "http://files.test".to_string(),
            max_upload_bytes,
        };
        ActiveStorage::new(db, config)
    }

    fn png(name: &str, len: usize) -> FileUpload {
        FileUpload {
            filename: name.to_string(),
            content_type: Some("image/png".to_string()),
            data: vec![7u8; len],
        }
    }

    #[test]
    fn extension_is_sanitised() {
        assert_eq!(extension_of("badge.PNG"), Some("png".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("evil.p$p"), None);
    }

    #[tokio::test]
    async fn attach_find_and_delete() {
        let storage = storage_in_temp_dir(1024).await;

        let stored = storage.attach("achievement", 3, "icon", png("star.png", 16)).await.unwrap();
        assert_eq!(stored.model_type, "achievement");
        assert_eq!(stored.size, 16);
        assert!(stored.url.starts_with("http://files.test/achievement/3/"));
        assert!(stored.url.ends_with(".png"));

        let path = storage.file_path(&stored);
        assert!(path.exists());

        let found = storage.find("achievement", 3, "icon").await.unwrap();
        assert_eq!(found.as_ref().map(|a| a.id), Some(stored.id));

        let batch = storage.find_many("achievement", &[3, 4], "icon").await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.get(&3).map(|a| a.id), Some(stored.id));

        storage.delete(&stored).await.unwrap();
        assert!(!path.exists());
        assert!(storage.find("achievement", 3, "icon").await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(storage.root());
    }

    #[tokio::test]
    async fn rejects_empty_and_oversized_files() {
        let storage = storage_in_temp_dir(8).await;

        let empty = storage.attach("level", 1, "icon", png("a.png", 0)).await;
        assert!(matches!(empty, Err(DomainError::Validation(_))));

        let big = storage.attach("level", 1, "icon", png("a.png", 9)).await;
        assert!(matches!(big, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn deleting_a_missing_file_still_drops_the_record() {
        let storage = storage_in_temp_dir(1024).await;
        let stored = storage.attach("level", 2, "icon", png("x.png", 4)).await.unwrap();

        std::fs::remove_file(storage.file_path(&stored)).unwrap();
        storage.delete(&stored).await.unwrap();
        assert!(storage.find("level", 2, "icon").await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(storage.root());
    }
}
