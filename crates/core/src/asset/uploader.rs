//! Single-asset upload pipeline.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use landmark_shared::ResourceId;
use tracing::{debug, info, warn};

use super::codec::extension_for;
use super::error::AssetUploadFailed;
use super::types::{AssetRole, EncodedAsset, StoredAsset};
use crate::storage::BlobWriter;

/// Storage key for an asset.
///
/// Format: `{namespace}/{resource_id}/{role}{extension}`. The key depends on
/// nothing else, so re-uploading a role overwrites the previous object.
#[must_use]
pub fn asset_path(
    namespace: &str,
    resource_id: ResourceId,
    role: AssetRole,
    extension: &str,
) -> String {
    let namespace = namespace.trim_matches('/');
    if namespace.is_empty() {
        format!("{resource_id}/{role}{extension}")
    } else {
        format!("{namespace}/{resource_id}/{role}{extension}")
    }
}

/// Uploads one encoded asset through a [`BlobWriter`].
pub struct AssetUploader<B: BlobWriter> {
    writer: Arc<B>,
    namespace: String,
}

impl<B: BlobWriter> AssetUploader<B> {
    /// Create an uploader writing under `namespace`.
    #[must_use]
    pub fn new(writer: Arc<B>, namespace: impl Into<String>) -> Self {
        Self {
            writer,
            namespace: namespace.into(),
        }
    }

    /// Decode, validate and store one asset.
    ///
    /// No retries happen here; a storage fault is reported once.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetUploadFailed`] tagged with `role` when a field is
    /// missing, the payload is not base64, the content type is unsupported,
    /// or the blob writer fails.
    pub async fn upload(
        &self,
        resource_id: ResourceId,
        role: AssetRole,
        asset: &EncodedAsset,
    ) -> Result<StoredAsset, AssetUploadFailed> {
        let (payload, content_type) = match (asset.payload.as_deref(), asset.content_type.as_deref()) {
            (Some(p), Some(c)) if !p.is_empty() && !c.is_empty() => (p, c),
            _ => {
                let field = asset.missing_fields().first().copied().unwrap_or("payload");
                return Err(AssetUploadFailed::missing_field(role, field));
            }
        };

        debug!(
            resource_id = %resource_id,
            role = %role,
            encoded_len = payload.len(),
            content_type,
            "Uploading asset"
        );

        let bytes = decode_payload(payload).map_err(|e| {
            warn!(resource_id = %resource_id, role = %role, error = %e, "Undecodable asset payload");
            AssetUploadFailed::malformed_payload(role, e.to_string())
        })?;

        let extension = extension_for(role, Some(content_type)).inspect_err(|_| {
            warn!(resource_id = %resource_id, role = %role, content_type, "Unsupported asset content type");
        })?;

        let path = asset_path(&self.namespace, resource_id, role, extension);

        let public_url = self
            .writer
            .write(&path, bytes, content_type)
            .await
            .map_err(|e| {
                warn!(
                    resource_id = %resource_id,
                    role = %role,
                    path = %path,
                    stage = %e.stage(),
                    error = %e,
                    "Asset storage failed"
                );
                AssetUploadFailed::storage(role, &e)
            })?;

        info!(resource_id = %resource_id, role = %role, path = %path, "Asset stored");

        Ok(StoredAsset {
            role,
            path,
            public_url,
        })
    }
}

/// Decode standard base64, tolerating line breaks from MIME-wrapped input.
fn decode_payload(payload: &str) -> Result<Bytes, base64::DecodeError> {
    let decoded = if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        STANDARD.decode(compact)?
    } else {
        STANDARD.decode(payload)?
    };
    Ok(Bytes::from(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::UploadCause;
    use crate::storage::StorageStage;
    use crate::testing::{JPEG_BYTES, PNG_BYTES, RecordingWriter, b64};
    use std::str::FromStr;

    fn resource_id() -> ResourceId {
        ResourceId::from_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").expect("valid uuid")
    }

    #[test]
    fn test_asset_path_format() {
        let path = asset_path("images", resource_id(), AssetRole::Thumbnail, ".jpg");
        assert_eq!(path, "images/6ba7b810-9dad-11d1-80b4-00c04fd430c8/thumbnail.jpg");
    }

    #[test]
    fn test_asset_path_trims_namespace_slashes() {
        assert_eq!(
            asset_path("/images/", resource_id(), AssetRole::Marker, ".png"),
            asset_path("images", resource_id(), AssetRole::Marker, ".png")
        );
        assert_eq!(
            asset_path("", resource_id(), AssetRole::Marker, ".png"),
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8/marker.png"
        );
    }

    #[tokio::test]
    async fn test_upload_stores_decoded_bytes() {
        let writer = Arc::new(RecordingWriter::new());
        let uploader = AssetUploader::new(writer.clone(), "images");

        let stored = uploader
            .upload(
                resource_id(),
                AssetRole::Thumbnail,
                &EncodedAsset::new(b64(JPEG_BYTES), "image/jpeg"),
            )
            .await
            .expect("upload should succeed");

        let expected_path = "images/6ba7b810-9dad-11d1-80b4-00c04fd430c8/thumbnail.jpg";
        assert_eq!(stored.role, AssetRole::Thumbnail);
        assert_eq!(stored.path, expected_path);
        assert_eq!(stored.public_url, format!("https://cdn.test/{expected_path}"));

        let (bytes, content_type) = writer.object(expected_path).expect("object written");
        assert_eq!(bytes.as_ref(), JPEG_BYTES);
        assert_eq!(content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_upload_accepts_line_wrapped_base64() {
        let writer = Arc::new(RecordingWriter::new());
        let uploader = AssetUploader::new(writer.clone(), "images");

        let encoded = b64(PNG_BYTES);
        let (head, tail) = encoded.split_at(8);
        let wrapped = format!("{head}\r\n{tail}\n");

        let stored = uploader
            .upload(
                resource_id(),
                AssetRole::Marker,
                &EncodedAsset::new(wrapped, "image/png"),
            )
            .await
            .unwrap();

        let (bytes, _) = writer.object(&stored.path).unwrap();
        assert_eq!(bytes.as_ref(), PNG_BYTES);
    }

    #[tokio::test]
    async fn test_upload_missing_field_makes_no_write() {
        let writer = Arc::new(RecordingWriter::new());
        let uploader = AssetUploader::new(writer.clone(), "images");

        let asset = EncodedAsset {
            payload: Some(b64(PNG_BYTES)),
            content_type: None,
        };
        let err = uploader
            .upload(resource_id(), AssetRole::Marker, &asset)
            .await
            .unwrap_err();

        assert_eq!(err, AssetUploadFailed::missing_field(AssetRole::Marker, "contentType"));
        assert_eq!(writer.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_unsupported_type_makes_no_write() {
        let writer = Arc::new(RecordingWriter::new());
        let uploader = AssetUploader::new(writer.clone(), "images");

        let err = uploader
            .upload(
                resource_id(),
                AssetRole::Thumbnail,
                &EncodedAsset::new(b64(JPEG_BYTES), "image/bmp"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.role, AssetRole::Thumbnail);
        assert_eq!(err.cause.kind(), "unsupported_media_type");
        assert_eq!(writer.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_malformed_payload_makes_no_write() {
        let writer = Arc::new(RecordingWriter::new());
        let uploader = AssetUploader::new(writer.clone(), "images");

        let err = uploader
            .upload(
                resource_id(),
                AssetRole::Marker,
                &EncodedAsset::new("not*base64!", "image/png"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err.cause, UploadCause::MalformedPayload { .. }));
        assert_eq!(writer.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_storage_failure_names_stage() {
        let writer = Arc::new(RecordingWriter::failing_write_on("marker"));
        let uploader = AssetUploader::new(writer.clone(), "images");

        let err = uploader
            .upload(
                resource_id(),
                AssetRole::Marker,
                &EncodedAsset::new(b64(PNG_BYTES), "image/png"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.role, AssetRole::Marker);
        assert!(matches!(
            err.cause,
            UploadCause::StorageWriteFailed {
                stage: StorageStage::Write,
                ..
            }
        ));
        assert_eq!(writer.calls(), 1);
    }

    #[tokio::test]
    async fn test_upload_publish_failure_names_stage() {
        let writer = Arc::new(RecordingWriter::failing_publish_on("thumbnail"));
        let uploader = AssetUploader::new(writer.clone(), "images");

        let err = uploader
            .upload(
                resource_id(),
                AssetRole::Thumbnail,
                &EncodedAsset::new(b64(JPEG_BYTES), "image/jpeg"),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err.cause,
            UploadCause::StorageWriteFailed {
                stage: StorageStage::Publish,
                ..
            }
        ));
    }
}
