//! Core business logic for Landmark.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and the asset pipeline live here.
//!
//! # Modules
//!
//! - `asset` - Codec validation and single-asset upload
//! - `resource` - Resource records and the attachment orchestrator
//! - `storage` - Object storage behind Apache OpenDAL

pub mod asset;
pub mod resource;
pub mod storage;

#[cfg(test)]
mod testing;
