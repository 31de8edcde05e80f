//! Asset types and data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two asset slots an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    /// List/preview image.
    Thumbnail,
    /// Image drawn on the map at the resource's position.
    Marker,
}

impl AssetRole {
    /// Both roles, in the order they are reported.
    pub const ALL: [Self; 2] = [Self::Thumbnail, Self::Marker];

    /// Role name, also used as the object file stem.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Marker => "marker",
        }
    }
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transport-encoded image as received from a client.
///
/// Both fields are optional because presence is validated by the pipeline,
/// not by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedAsset {
    /// Base64 payload.
    pub payload: Option<String>,
    /// Declared MIME type.
    pub content_type: Option<String>,
}

impl EncodedAsset {
    /// Create an asset with both fields present.
    #[must_use]
    pub fn new(payload: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            content_type: Some(content_type.into()),
        }
    }

    /// Names of absent or empty fields, payload first.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.payload.as_deref()) {
            missing.push(MissingField::PAYLOAD);
        }
        if is_blank(self.content_type.as_deref()) {
            missing.push(MissingField::CONTENT_TYPE);
        }
        missing
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// A required input that was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingField {
    /// Asset slot the field belongs to.
    pub role: AssetRole,
    /// Field name as clients send it.
    pub field: &'static str,
}

impl MissingField {
    /// Payload field name.
    pub const PAYLOAD: &'static str = "payload";
    /// Content type field name.
    pub const CONTENT_TYPE: &'static str = "contentType";
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.role, self.field)
    }
}

/// A successfully stored asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Slot the asset was stored for.
    pub role: AssetRole,
    /// Storage key.
    pub path: String,
    /// Public URL of the stored object.
    pub public_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(AssetRole::Thumbnail.to_string(), "thumbnail");
        assert_eq!(AssetRole::Marker.to_string(), "marker");
        assert_eq!(
            serde_json::to_string(&AssetRole::Marker).unwrap(),
            "\"marker\""
        );
    }

    #[test]
    fn test_missing_fields() {
        assert!(EncodedAsset::new("AAAA", "image/png").missing_fields().is_empty());
        assert_eq!(
            EncodedAsset::default().missing_fields(),
            vec!["payload", "contentType"]
        );

        let empty_payload = EncodedAsset {
            payload: Some(String::new()),
            content_type: Some("image/png".into()),
        };
        assert_eq!(empty_payload.missing_fields(), vec!["payload"]);

        let no_type = EncodedAsset {
            payload: Some("AAAA".into()),
            content_type: None,
        };
        assert_eq!(no_type.missing_fields(), vec!["contentType"]);
    }

    #[test]
    fn test_missing_field_display() {
        let missing = MissingField {
            role: AssetRole::Marker,
            field: MissingField::PAYLOAD,
        };
        assert_eq!(missing.to_string(), "marker.payload");
    }
}
