//! Object storage for resource assets using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, GCS (interop)
//! - Azure Blob Storage
//! - Local filesystem (development only)
//! - Process memory (tests only)
//!
//! # Write path
//!
//! ```text
//! ┌──────────────┐   put    ┌──────────────┐  publish  ┌──────────────────┐
//! │ bytes + type │ ───────► │ op.write_with│ ────────► │ op.stat + URL    │
//! └──────────────┘  (write) └──────────────┘ (publish) └──────────────────┘
//! ```
//!
//! A write only counts once the object is observable at its key; the returned
//! location is `public_base_url/key`.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::{StorageError, StorageStage};
pub use service::{BlobWriter, StorageService};
