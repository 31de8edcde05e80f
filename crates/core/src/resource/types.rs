//! Resource types and data structures.

use chrono::{DateTime, Utc};
use landmark_shared::ResourceId;
use serde::{Deserialize, Serialize};

use crate::asset::{AssetRole, EncodedAsset, MissingField};

/// A registered resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier.
    pub id: ResourceId,
    /// Display name.
    pub name: Option<String>,
    /// Facebook handle.
    pub facebook_id: Option<String>,
    /// Instagram handle.
    pub instagram_id: Option<String>,
    /// Twitter handle.
    pub twitter_id: Option<String>,
    /// LINE ID.
    pub line_id: Option<String>,
    /// Website.
    pub url: Option<String>,
    /// Public thumbnail location; empty until assets are attached.
    pub thumbnail_url: String,
    /// Public marker location; empty until assets are attached.
    pub marker_url: String,
    /// Last time the record was read.
    pub last_access: Option<DateTime<Utc>>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Resource {
    /// Build a freshly registered record with empty asset fields.
    #[must_use]
    pub fn from_new(id: ResourceId, input: NewResource, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            facebook_id: input.facebook_id,
            instagram_id: input.instagram_id,
            twitter_id: input.twitter_id,
            line_id: input.line_id,
            url: input.url,
            thumbnail_url: String::new(),
            marker_url: String::new(),
            last_access: None,
            created_at,
        }
    }

    /// Whether both assets have been attached.
    #[must_use]
    pub fn has_assets(&self) -> bool {
        !self.thumbnail_url.is_empty() && !self.marker_url.is_empty()
    }
}

/// Input for registering a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewResource {
    /// Display name.
    pub name: Option<String>,
    /// Facebook handle.
    pub facebook_id: Option<String>,
    /// Instagram handle.
    pub instagram_id: Option<String>,
    /// Twitter handle.
    pub twitter_id: Option<String>,
    /// LINE ID.
    pub line_id: Option<String>,
    /// Website.
    pub url: Option<String>,
}

/// Both asset URLs, always written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocations {
    /// Public thumbnail location.
    pub thumbnail_url: String,
    /// Public marker location.
    pub marker_url: String,
}

/// The two encoded images of an attach request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachInput {
    /// Thumbnail image.
    pub thumbnail: EncodedAsset,
    /// Marker image.
    pub marker: EncodedAsset,
}

impl AttachInput {
    /// Create an attach input.
    #[must_use]
    pub fn new(thumbnail: EncodedAsset, marker: EncodedAsset) -> Self {
        Self { thumbnail, marker }
    }

    /// The asset for a role.
    #[must_use]
    pub fn asset(&self, role: AssetRole) -> &EncodedAsset {
        match role {
            AssetRole::Thumbnail => &self.thumbnail,
            AssetRole::Marker => &self.marker,
        }
    }

    /// Every absent field across both assets.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<MissingField> {
        AssetRole::ALL
            .into_iter()
            .flat_map(|role| {
                self.asset(role)
                    .missing_fields()
                    .into_iter()
                    .map(move |field| MissingField { role, field })
            })
            .collect()
    }
}

/// Acknowledgment of a completed attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachReceipt {
    /// Resource the assets were attached to.
    pub resource_id: ResourceId,
    /// Public thumbnail location.
    pub thumbnail_url: String,
    /// Public marker location.
    pub marker_url: String,
}
