//! Image assets attached to resources.
//!
//! A resource carries exactly two assets, addressed by [`AssetRole`]. Each
//! inbound asset is a base64 payload plus a declared content type; the
//! [`AssetUploader`] turns it into a stored, publicly addressable object:
//!
//! ```text
//! presence check ─► base64 decode ─► extension_for ─► asset_path ─► BlobWriter::write
//! ```
//!
//! Every failure is tagged with the role it happened for.

mod codec;
mod error;
mod types;
mod uploader;

pub use codec::{ImageFormat, extension_for};
pub use error::{AssetUploadFailed, UploadCause};
pub use types::{AssetRole, EncodedAsset, MissingField, StoredAsset};
pub use uploader::{AssetUploader, asset_path};
