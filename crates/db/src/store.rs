//! Record store selection.

use chrono::{DateTime, Utc};
use landmark_core::resource::{
    AssetLocations, NewResource, RecordStoreError, Resource,
    ResourceRepository as ResourceRepoTrait,
};
use landmark_shared::{DatabaseConfig, ResourceId};
use sea_orm::DbErr;
use tracing::{info, warn};

use crate::repositories::{MemoryResourceRepository, ResourceRepository};

/// The record store the application runs against.
#[derive(Debug, Clone)]
pub enum RecordStore {
    /// Postgres via SeaORM.
    Postgres(ResourceRepository),
    /// Process memory.
    Memory(MemoryResourceRepository),
}

impl RecordStore {
    /// Connect to the configured database, or fall back to memory when no URL
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL is configured but the connection fails.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DbErr> {
        match config.url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => {
                let db = crate::connect_with(url, config).await?;
                info!("Connected to database");
                Ok(Self::Postgres(ResourceRepository::new(db)))
            }
            None => {
                warn!("No database URL configured; records are kept in memory");
                Ok(Self::Memory(MemoryResourceRepository::new()))
            }
        }
    }

    /// Backend name for logs.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

impl ResourceRepoTrait for RecordStore {
    async fn create(&self, id: ResourceId, input: NewResource) -> Result<Resource, RecordStoreError> {
        match self {
            Self::Postgres(repo) => repo.create(id, input).await,
            Self::Memory(repo) => repo.create(id, input).await,
        }
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Resource>, RecordStoreError> {
        match self {
            Self::Postgres(repo) => repo.find_by_id(id).await,
            Self::Memory(repo) => repo.find_by_id(id).await,
        }
    }

    async fn update_assets(
        &self,
        id: ResourceId,
        locations: AssetLocations,
    ) -> Result<(), RecordStoreError> {
        match self {
            Self::Postgres(repo) => repo.update_assets(id, locations).await,
            Self::Memory(repo) => repo.update_assets(id, locations).await,
        }
    }

    async fn touch(&self, id: ResourceId, at: DateTime<Utc>) -> Result<(), RecordStoreError> {
        match self {
            Self::Postgres(repo) => repo.touch(id, at).await,
            Self::Memory(repo) => repo.touch(id, at).await,
        }
    }
}
