//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Database connection and core tables (db)
//! - Change events (emitter)
//! - HTTP server setup (server)
//! - Application state (state)
//! - Attachment files (storage)

pub mod config;
pub mod db;
pub mod emitter;
pub mod server;
pub mod state;
pub mod storage;

pub use state::AppState;
