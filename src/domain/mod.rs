//! Domain layer - framework-agnostic contracts
//!
//! This layer contains:
//! - Error types (errors)
//! - Pagination primitives (pagination)
//! - Partial-update values (patch)
//! - Service traits implemented per module (service)

pub mod errors;
pub mod pagination;
pub mod patch;
pub mod service;

pub use errors::DomainError;
pub use pagination::{PageRequest, PaginatedResponse, Pagination};
pub use patch::Patch;
pub use service::{CrudService, FileUpload, IconService};
