//! In-process resource repository.
//!
//! Used when no database URL is configured and by router tests. Records live
//! as long as the process.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use landmark_core::resource::{
    AssetLocations, NewResource, RecordStoreError, Resource,
    ResourceRepository as ResourceRepoTrait,
};
use landmark_shared::ResourceId;

/// Resource repository backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceRepository {
    records: Arc<DashMap<ResourceId, Resource>>,
}

impl MemoryResourceRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResourceRepoTrait for MemoryResourceRepository {
    async fn create(&self, id: ResourceId, input: NewResource) -> Result<Resource, RecordStoreError> {
        let resource = Resource::from_new(id, input, Utc::now());
        self.records.insert(id, resource.clone());
        Ok(resource)
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Resource>, RecordStoreError> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn update_assets(
        &self,
        id: ResourceId,
        locations: AssetLocations,
    ) -> Result<(), RecordStoreError> {
        // The entry guard holds the shard lock, so readers never see one URL
        // without the other.
        let mut record = self
            .records
            .get_mut(&id)
            .ok_or(RecordStoreError::NotFound(id))?;
        record.thumbnail_url = locations.thumbnail_url;
        record.marker_url = locations.marker_url;
        Ok(())
    }

    async fn touch(&self, id: ResourceId, at: DateTime<Utc>) -> Result<(), RecordStoreError> {
        let mut record = self
            .records
            .get_mut(&id)
            .ok_or(RecordStoreError::NotFound(id))?;
        record.last_access = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryResourceRepository::new();
        let id = ResourceId::new();

        let created = repo
            .create(
                id,
                NewResource {
                    twitter_id: Some("shop".into()),
                    ..NewResource::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(repo.len(), 1);
        let found = repo.find_by_id(id).await.unwrap().expect("record exists");
        assert_eq!(found, created);
        assert!(repo.find_by_id(ResourceId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_assets_is_partial() {
        let repo = MemoryResourceRepository::new();
        let id = ResourceId::new();
        repo.create(
            id,
            NewResource {
                name: Some("Kept".into()),
                ..NewResource::default()
            },
        )
        .await
        .unwrap();

        repo.update_assets(
            id,
            AssetLocations {
                thumbnail_url: "https://cdn/t.jpg".into(),
                marker_url: "https://cdn/m.png".into(),
            },
        )
        .await
        .unwrap();

        let record = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(record.name.as_deref(), Some("Kept"));
        assert_eq!(record.thumbnail_url, "https://cdn/t.jpg");
        assert_eq!(record.marker_url, "https://cdn/m.png");
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let repo = MemoryResourceRepository::new();
        let err = repo
            .update_assets(
                ResourceId::new(),
                AssetLocations {
                    thumbnail_url: "t".into(),
                    marker_url: "m".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RecordStoreError::NotFound(_)));

        let err = repo.touch(ResourceId::new(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, RecordStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_touch_sets_last_access() {
        let repo = MemoryResourceRepository::new();
        let id = ResourceId::new();
        repo.create(id, NewResource::default()).await.unwrap();

        let at = Utc::now();
        repo.touch(id, at).await.unwrap();
        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().last_access, Some(at));
    }
}
