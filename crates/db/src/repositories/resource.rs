//! Resource repository for database operations.
//!
//! Implements resource persistence using SeaORM.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::entities::resources;
use landmark_core::resource::{
    AssetLocations, NewResource, RecordStoreError, Resource,
    ResourceRepository as ResourceRepoTrait,
};
use landmark_shared::ResourceId;

/// Resource repository implementation.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    db: DatabaseConnection,
}

impl ResourceRepository {
    /// Create a new resource repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ResourceRepoTrait for ResourceRepository {
    async fn create(&self, id: ResourceId, input: NewResource) -> Result<Resource, RecordStoreError> {
        let now = Utc::now().into();
        let active_model = resources::ActiveModel {
            id: Set(id.into_inner()),
            name: Set(input.name),
            facebook_id: Set(input.facebook_id),
            instagram_id: Set(input.instagram_id),
            twitter_id: Set(input.twitter_id),
            line_id: Set(input.line_id),
            url: Set(input.url),
            thumbnail_url: Set(String::new()),
            marker_url: Set(String::new()),
            last_access: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(store_error)?;
        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<Resource>, RecordStoreError> {
        let model = resources::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?;
        Ok(model.map(to_domain))
    }

    async fn update_assets(
        &self,
        id: ResourceId,
        locations: AssetLocations,
    ) -> Result<(), RecordStoreError> {
        // Single UPDATE statement so both columns change atomically.
        let result = resources::Entity::update_many()
            .col_expr(
                resources::Column::ThumbnailUrl,
                Expr::value(locations.thumbnail_url),
            )
            .col_expr(resources::Column::MarkerUrl, Expr::value(locations.marker_url))
            .col_expr(resources::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(resources::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        if result.rows_affected == 0 {
            return Err(RecordStoreError::NotFound(id));
        }
        debug!(resource_id = %id, "Asset URLs updated");
        Ok(())
    }

    async fn touch(&self, id: ResourceId, at: DateTime<Utc>) -> Result<(), RecordStoreError> {
        let result = resources::Entity::update_many()
            .col_expr(resources::Column::LastAccess, Expr::value(at))
            .filter(resources::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        if result.rows_affected == 0 {
            return Err(RecordStoreError::NotFound(id));
        }
        Ok(())
    }
}

fn store_error(err: DbErr) -> RecordStoreError {
    RecordStoreError::backend(err.to_string())
}

/// Convert database model to domain model.
fn to_domain(model: resources::Model) -> Resource {
    Resource {
        id: ResourceId::from_uuid(model.id),
        name: model.name,
        facebook_id: model.facebook_id,
        instagram_id: model.instagram_id,
        twitter_id: model.twitter_id,
        line_id: model.line_id,
        url: model.url,
        thumbnail_url: model.thumbnail_url,
        marker_url: model.marker_url,
        last_access: model.last_access.map(|t| t.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
