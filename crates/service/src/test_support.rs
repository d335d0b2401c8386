#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::category::{CategoryConfig, CategoryService};
use crate::leaf_record::repo::seaorm::SeaOrmLeafRecordRepository;
use crate::leaf_record::repository::mock::MockLeafRecordRepository;

/// Fresh in-memory database per test, migrations applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Category service with database-backed leaf records.
pub async fn category_service() -> Result<(CategoryService, Arc<SeaOrmLeafRecordRepository>), anyhow::Error> {
    let db = get_db().await?;
    let leaf = Arc::new(SeaOrmLeafRecordRepository { db: db.clone() });
    let svc = CategoryService::new(db, leaf.clone(), CategoryConfig::default());
    Ok((svc, leaf))
}

/// Category service whose leaf records live in memory.
pub async fn category_service_with_mock() -> Result<(CategoryService, Arc<MockLeafRecordRepository>), anyhow::Error> {
    let db = get_db().await?;
    let leaf = Arc::new(MockLeafRecordRepository::default());
    let svc = CategoryService::new(db, leaf.clone(), CategoryConfig::default());
    Ok((svc, leaf))
}
