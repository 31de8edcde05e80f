//! Record store layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Postgres and in-memory implementations of the resource repository
//! - [`RecordStore`], which picks one of them from configuration
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
mod store;

pub use repositories::{MemoryResourceRepository, ResourceRepository};
pub use store::RecordStore;

use std::time::Duration;

use landmark_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection using the configured pool bounds.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(
    database_url: &str,
    config: &DatabaseConfig,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}
