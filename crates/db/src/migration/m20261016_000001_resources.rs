//! Resources migration.
//!
//! Creates the resources table. Asset URL columns are non-null with an empty
//! default so a record is never observed with only one of them set.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RESOURCES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS resources CASCADE;")
            .await?;
        Ok(())
    }
}

const RESOURCES_SQL: &str = r"
CREATE TABLE resources (
    id UUID PRIMARY KEY,
    name TEXT,
    facebook_id TEXT,
    instagram_id TEXT,
    twitter_id TEXT,
    line_id TEXT,
    url TEXT,
    thumbnail_url TEXT NOT NULL DEFAULT '',
    marker_url TEXT NOT NULL DEFAULT '',
    last_access TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Both asset URLs are set together or not at all
    CONSTRAINT chk_assets_paired CHECK ((thumbnail_url = '') = (marker_url = ''))
);
";
