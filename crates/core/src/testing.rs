//! Test doubles shared by the core test modules.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use landmark_shared::ResourceId;

use crate::resource::{AssetLocations, NewResource, RecordStoreError, Resource, ResourceRepository};
use crate::storage::{BlobWriter, StorageError};

/// JPEG start-of-image marker followed by filler.
pub const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0jpeg-body";
/// PNG signature followed by filler.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\npng-body";

pub fn b64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Records every write and fails on demand for paths containing a marker.
#[derive(Default)]
pub struct RecordingWriter {
    objects: Mutex<HashMap<String, (Bytes, String)>>,
    calls: AtomicUsize,
    fail_write_containing: Mutex<Option<String>>,
    fail_publish_containing: Mutex<Option<String>>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the write stage for any path containing `fragment`.
    pub fn failing_write_on(fragment: &str) -> Self {
        let writer = Self::default();
        *writer.fail_write_containing.lock().unwrap() = Some(fragment.to_string());
        writer
    }

    /// Fail the publish stage for any path containing `fragment`.
    pub fn failing_publish_on(fragment: &str) -> Self {
        let writer = Self::default();
        *writer.fail_publish_containing.lock().unwrap() = Some(fragment.to_string());
        writer
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn object(&self, path: &str) -> Option<(Bytes, String)> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    pub fn paths(&self) -> HashSet<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

fn matches(fragment: &Mutex<Option<String>>, path: &str) -> bool {
    fragment
        .lock()
        .unwrap()
        .as_deref()
        .is_some_and(|f| path.contains(f))
}

impl BlobWriter for RecordingWriter {
    async fn write(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent uploads genuinely interleave.
        tokio::task::yield_now().await;

        if matches(&self.fail_write_containing, path) {
            return Err(StorageError::write_failed(path, "connection reset"));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        if matches(&self.fail_publish_containing, path) {
            return Err(StorageError::publish_failed(path, "acl update denied"));
        }
        Ok(format!("https://cdn.test/{path}"))
    }
}

/// Completes a write only once `parties` writes are in flight together.
pub struct RendezvousWriter {
    barrier: tokio::sync::Barrier,
}

impl RendezvousWriter {
    pub fn new(parties: usize) -> Self {
        Self {
            barrier: tokio::sync::Barrier::new(parties),
        }
    }
}

impl BlobWriter for RendezvousWriter {
    async fn write(
        &self,
        path: &str,
        _bytes: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        self.barrier.wait().await;
        Ok(format!("https://cdn.test/{path}"))
    }
}

/// In-memory record store that counts asset updates.
#[derive(Default)]
pub struct MockResourceRepository {
    records: Mutex<HashMap<ResourceId, Resource>>,
    asset_updates: AtomicUsize,
    fail_updates: bool,
}

impl MockResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, resource: Resource) {
        self.records.lock().unwrap().insert(resource.id, resource);
    }

    pub fn get(&self, id: ResourceId) -> Option<Resource> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn asset_updates(&self) -> usize {
        self.asset_updates.load(Ordering::SeqCst)
    }
}

/// A freshly registered record with empty asset fields.
pub fn sample_resource(id: ResourceId) -> Resource {
    Resource {
        id,
        name: Some("Cafe Mocha".to_string()),
        facebook_id: Some("cafe.mocha".to_string()),
        instagram_id: None,
        twitter_id: Some("cafemocha".to_string()),
        line_id: None,
        url: Some("https://cafe.example.com".to_string()),
        thumbnail_url: String::new(),
        marker_url: String::new(),
        last_access: None,
        created_at: Utc::now(),
    }
}

impl ResourceRepository for MockResourceRepository {
    async fn create(&self, id: ResourceId, input: NewResource) -> Result<Resource, RecordStoreError> {
        let resource = Resource::from_new(id, input, Utc::now());
        self.insert(resource.clone());
        Ok(resource)
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Resource>, RecordStoreError> {
        Ok(self.get(id))
    }

    async fn update_assets(
        &self,
        id: ResourceId,
        locations: AssetLocations,
    ) -> Result<(), RecordStoreError> {
        if self.fail_updates {
            return Err(RecordStoreError::backend("write conflict"));
        }
        self.asset_updates.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(&id).ok_or(RecordStoreError::NotFound(id))?;
        record.thumbnail_url = locations.thumbnail_url;
        record.marker_url = locations.marker_url;
        Ok(())
    }

    async fn touch(&self, id: ResourceId, at: DateTime<Utc>) -> Result<(), RecordStoreError> {
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(&id).ok_or(RecordStoreError::NotFound(id))?;
        record.last_access = Some(at);
        Ok(())
    }
}
