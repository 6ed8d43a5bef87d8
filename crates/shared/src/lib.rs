//! Shared library for the manga catalog project.
//!
//! This crate provides common functionality used by the catalog crate:
//! - Configuration management
//! - Data models (titles, filters, user preferences)
//! - Persisted key-value storage
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
