//! Schema migrations
//!
//! Migrations are plain SQL files read at runtime, so the crate builds
//! without a live database.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir.to_path_buf()).await?;
    info!(dir = %dir.display(), count = migrator.iter().count(), "Applying migrations");
    migrator.run(pool).await
}
