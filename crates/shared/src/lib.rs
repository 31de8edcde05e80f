//! Shared types, errors, and configuration for Landmark.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types and response error codes
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, ServerConfig, StorageKind, StorageSettings};
pub use error::{AppError, ErrorCode};
pub use types::ResourceId;
