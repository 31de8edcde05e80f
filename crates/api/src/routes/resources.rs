//! Resource routes: registration, lookup and image upload.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, response::ApiResponse};
use landmark_core::asset::EncodedAsset;
use landmark_core::resource::{AttachInput, AttachReceipt, NewResource, Resource};
use landmark_shared::ResourceId;

/// Creates the resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resources", post(create_resource))
        .route("/resources/{id}", get(get_resource))
        .route("/resources/upload-images/{id}", post(upload_images))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for registering a resource.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    /// Display name.
    pub name: Option<String>,
    /// Facebook handle.
    pub facebook_id: Option<String>,
    /// Instagram handle.
    pub instagram_id: Option<String>,
    /// Twitter handle.
    pub twitter_id: Option<String>,
    /// LINE id.
    pub line_id: Option<String>,
    /// Web site.
    pub url: Option<String>,
}

impl From<CreateResourceRequest> for NewResource {
    fn from(req: CreateResourceRequest) -> Self {
        Self {
            name: req.name,
            facebook_id: req.facebook_id,
            instagram_id: req.instagram_id,
            twitter_id: req.twitter_id,
            line_id: req.line_id,
            url: req.url,
        }
    }
}

/// Response for a registered resource.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Generated resource ID.
    pub id: String,
}

/// A resource as returned to clients. Absent text fields are `""`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    /// Resource ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Facebook handle.
    pub facebook_id: String,
    /// Instagram handle.
    pub instagram_id: String,
    /// Twitter handle.
    pub twitter_id: String,
    /// LINE id.
    pub line_id: String,
    /// Web site.
    pub url: String,
    /// Public thumbnail URL.
    pub thumbnail_url: String,
    /// Public marker URL.
    pub marker_url: String,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name.unwrap_or_default(),
            facebook_id: r.facebook_id.unwrap_or_default(),
            instagram_id: r.instagram_id.unwrap_or_default(),
            twitter_id: r.twitter_id.unwrap_or_default(),
            line_id: r.line_id.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
            thumbnail_url: r.thumbnail_url,
            marker_url: r.marker_url,
        }
    }
}

/// Request body for uploading both images. Payloads are base64.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImagesRequest {
    /// Thumbnail payload.
    pub thumbnail: Option<String>,
    /// Thumbnail content type.
    pub thumbnail_mime_type: Option<String>,
    /// Marker payload.
    pub marker: Option<String>,
    /// Marker content type.
    pub marker_mime_type: Option<String>,
}

impl From<UploadImagesRequest> for AttachInput {
    fn from(req: UploadImagesRequest) -> Self {
        Self {
            thumbnail: EncodedAsset {
                payload: req.thumbnail,
                content_type: req.thumbnail_mime_type,
            },
            marker: EncodedAsset {
                payload: req.marker,
                content_type: req.marker_mime_type,
            },
        }
    }
}

/// Response after both images are attached.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImagesResponse {
    /// Resource ID.
    pub id: String,
    /// Public thumbnail URL.
    pub thumbnail_url: String,
    /// Public marker URL.
    pub marker_url: String,
}

impl From<AttachReceipt> for UploadImagesResponse {
    fn from(receipt: AttachReceipt) -> Self {
        Self {
            id: receipt.resource_id.to_string(),
            thumbnail_url: receipt.thumbnail_url,
            marker_url: receipt.marker_url,
        }
    }
}

/// Parse a path id. An id that is not a UUID cannot name a resource.
fn parse_id(raw: &str) -> Result<ResourceId, ApiError> {
    ResourceId::from_str(raw).map_err(|_| ApiError::unknown_id(raw))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/v1/resources`
async fn create_resource(
    State(state): State<AppState>,
    payload: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> Result<ApiResponse<CreatedResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::rejected(&e))?;

    let resource = state
        .resources
        .create(payload.into())
        .await
        .map_err(|e| ApiError::create(&e))?;

    Ok(ApiResponse::created(CreatedResponse {
        id: resource.id.to_string(),
    }))
}

/// GET `/v1/resources/{id}`
async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ResourceResponse>, ApiError> {
    let id = parse_id(&id)?;

    let resource = state
        .resources
        .get(id)
        .await
        .map_err(|e| ApiError::read(&e))?;

    Ok(ApiResponse::ok(resource.into()))
}

/// POST `/v1/resources/upload-images/{id}`
async fn upload_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UploadImagesRequest>, JsonRejection>,
) -> Result<ApiResponse<UploadImagesResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload.map_err(|e| ApiError::rejected(&e))?;

    let receipt = state.resources.attach(id, payload.into()).await?;
    info!(resource_id = %id, "Images uploaded");

    Ok(ApiResponse::ok(receipt.into()))
}
