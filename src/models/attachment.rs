use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored file linked to any model through `(model_type, model_id, field)`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "attachments")]
#[schema(as = Attachment)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub model_type: String,
    pub model_id: i32,
    pub field: String,
    pub filename: String,
    /// Location on disk, relative to the storage root
    #[serde(skip_serializing)]
    pub path: String,
    pub url: String,
    pub content_type: Option<String>,
    pub size: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
