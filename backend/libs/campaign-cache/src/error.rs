//! Cache error types

use thiserror::Error;

/// Backend failures. A cache miss is never an error.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Snapshot decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Invalid cache data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type CacheResult<T> = Result<T, CacheError>;
