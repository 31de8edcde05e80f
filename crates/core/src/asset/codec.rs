//! Content-type to file extension mapping.

use super::error::AssetUploadFailed;
use super::types::AssetRole;

/// Raster formats accepted for assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
    /// `image/gif`
    Gif,
}

impl ImageFormat {
    /// Every accepted format.
    pub const ALL: [Self; 3] = [Self::Jpeg, Self::Png, Self::Gif];

    /// Look up a format by its exact MIME type.
    ///
    /// Matching is exact: no case folding, no parameters (`image/png; q=1`).
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Canonical MIME type.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// Canonical extension, dot included.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Gif => ".gif",
        }
    }
}

/// Resolve the storage extension for a declared content type.
///
/// # Errors
///
/// Fails with `UnsupportedMediaType` tagged with `role` for anything outside
/// [`ImageFormat::ALL`], including an absent content type.
pub fn extension_for(
    role: AssetRole,
    content_type: Option<&str>,
) -> Result<&'static str, AssetUploadFailed> {
    content_type
        .and_then(ImageFormat::from_content_type)
        .map(ImageFormat::extension)
        .ok_or_else(|| AssetUploadFailed::unsupported_media_type(role, content_type))
}
