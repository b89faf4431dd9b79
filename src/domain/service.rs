//! Service trait definitions
//!
//! These traits define the contract every gamification module fulfils.
//! Implementations live in the services layer; the HTTP handlers are generic
//! over them.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{DomainError, PageRequest, PaginatedResponse};

/// A file received from a client, ready to be attached to a model.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// CRUD contract shared by every module
#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    /// Payload accepted by `POST /{plural}`
    type Create: DeserializeOwned + Send + 'static;
    /// Payload accepted by `PUT /{plural}/:id`
    type Update: DeserializeOwned + Send + 'static;
    /// Detailed view, relations included
    type Detail: Serialize + Send + 'static;
    /// Compact view used in listings
    type ListItem: Serialize + Send + 'static;

    async fn create(&self, req: Self::Create) -> Result<Self::Detail, DomainError>;

    async fn update(&self, id: i32, req: Self::Update) -> Result<Self::Detail, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn get_by_id(&self, id: i32) -> Result<Self::Detail, DomainError>;

    async fn get_all(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Self::ListItem>, DomainError>;
}

/// Modules whose model carries an `icon` attachment
#[async_trait]
pub trait IconService: CrudService {
    /// Replace the icon; the previous file is deleted once the new one is stored
    async fn upload_icon(&self, id: i32, file: FileUpload) -> Result<Self::Detail, DomainError>;

    /// Delete the icon if present
    async fn remove_icon(&self, id: i32) -> Result<Self::Detail, DomainError>;
}
