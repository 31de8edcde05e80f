//! Resource service implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use landmark_shared::ResourceId;
use tracing::{error, info, warn};

use super::error::{AttachError, RecordStoreError, ResourceError};
use super::types::{AssetLocations, AttachInput, AttachReceipt, NewResource, Resource};
use crate::asset::{AssetRole, AssetUploader};
use crate::storage::BlobWriter;

/// Repository trait for resource persistence.
///
/// This trait is implemented by the db crate to provide actual storage.
pub trait ResourceRepository: Send + Sync {
    /// Create a new record.
    fn create(
        &self,
        id: ResourceId,
        input: NewResource,
    ) -> impl std::future::Future<Output = Result<Resource, RecordStoreError>> + Send;

    /// Find a record by ID.
    fn find_by_id(
        &self,
        id: ResourceId,
    ) -> impl std::future::Future<Output = Result<Option<Resource>, RecordStoreError>> + Send;

    /// Set both asset URLs in one write, leaving every other field untouched.
    ///
    /// Fails with `NotFound` if the record does not exist.
    fn update_assets(
        &self,
        id: ResourceId,
        locations: AssetLocations,
    ) -> impl std::future::Future<Output = Result<(), RecordStoreError>> + Send;

    /// Stamp the last access time.
    fn touch(
        &self,
        id: ResourceId,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RecordStoreError>> + Send;
}

/// Resource service: registration, lookup and asset attachment.
pub struct ResourceService<R: ResourceRepository, B: BlobWriter> {
    repo: Arc<R>,
    uploader: AssetUploader<B>,
}

impl<R: ResourceRepository, B: BlobWriter> ResourceService<R, B> {
    /// Create a new resource service.
    #[must_use]
    pub fn new(repo: Arc<R>, writer: Arc<B>, namespace: impl Into<String>) -> Self {
        Self {
            repo,
            uploader: AssetUploader::new(writer, namespace),
        }
    }

    /// Register a resource under a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub async fn create(&self, input: NewResource) -> Result<Resource, ResourceError> {
        let id = ResourceId::new();
        let resource = self.repo.create(id, input).await?;
        info!(resource_id = %id, "Resource registered");
        Ok(resource)
    }

    /// Get a resource and stamp its last access time.
    ///
    /// The returned record is the one read; a failed stamp is logged only.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or the read fails.
    pub async fn get(&self, id: ResourceId) -> Result<Resource, ResourceError> {
        let resource = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        if let Err(e) = self.repo.touch(id, Utc::now()).await {
            warn!(resource_id = %id, error = %e, "Failed to record last access");
        }

        Ok(resource)
    }

    /// Upload a thumbnail and a marker image and record both URLs.
    ///
    /// Inputs are checked before any I/O. Both uploads then run concurrently
    /// and are always awaited to completion, so a caller whose uploads both
    /// fail learns about both. The record is written exactly once, and only
    /// if both succeed. Objects stored by a successful sibling of a failed
    /// upload are not removed.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `MissingInput` if any payload or content type is absent
    /// - `NotFound` if the resource does not exist
    /// - `AttachmentFailed` listing each failed role
    /// - `RecordUpdateFailed` if the final record write fails
    pub async fn attach(
        &self,
        id: ResourceId,
        input: AttachInput,
    ) -> Result<AttachReceipt, AttachError> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            warn!(resource_id = %id, missing = missing.len(), "Attach rejected: missing input");
            return Err(AttachError::MissingInput { missing });
        }

        if self
            .repo
            .find_by_id(id)
            .await
            .map_err(AttachError::Store)?
            .is_none()
        {
            return Err(AttachError::NotFound(id));
        }

        let (thumbnail, marker) = tokio::join!(
            self.uploader
                .upload(id, AssetRole::Thumbnail, input.asset(AssetRole::Thumbnail)),
            self.uploader
                .upload(id, AssetRole::Marker, input.asset(AssetRole::Marker)),
        );

        let (thumbnail, marker) = match (thumbnail, marker) {
            (Ok(thumbnail), Ok(marker)) => (thumbnail, marker),
            (thumbnail, marker) => {
                let failures: Vec<_> = [thumbnail.err(), marker.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                warn!(
                    resource_id = %id,
                    failed = failures.len(),
                    "Attach failed; record left unchanged"
                );
                return Err(AttachError::AttachmentFailed { failures });
            }
        };

        let locations = AssetLocations {
            thumbnail_url: thumbnail.public_url,
            marker_url: marker.public_url,
        };

        self.repo
            .update_assets(id, locations.clone())
            .await
            .map_err(|e| {
                error!(resource_id = %id, error = %e, "Assets stored but record update failed");
                AttachError::RecordUpdateFailed(e)
            })?;

        info!(resource_id = %id, "Assets attached");

        Ok(AttachReceipt {
            resource_id: id,
            thumbnail_url: locations.thumbnail_url,
            marker_url: locations.marker_url,
        })
    }
}
