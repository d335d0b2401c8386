use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::ServiceError;
use crate::leaf_record::domain::LeafRecord;
use crate::leaf_record::repository::LeafRecordRepository;

use models::service;

pub struct SeaOrmLeafRecordRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl LeafRecordRepository for SeaOrmLeafRecordRepository {
    async fn find_by_category_id(&self, category_id: i32) -> Result<Vec<LeafRecord>, ServiceError> {
        let rows = service::Entity::find()
            .filter(service::Column::CategoryId.eq(category_id))
            .order_by_asc(service::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(LeafRecord::from).collect())
    }

    async fn find_by_category_ids(&self, category_ids: &[i32]) -> Result<HashMap<i32, Vec<LeafRecord>>, ServiceError> {
        let mut grouped: HashMap<i32, Vec<LeafRecord>> = HashMap::new();
        if category_ids.is_empty() { return Ok(grouped); }
        let rows = service::Entity::find()
            .filter(service::Column::CategoryId.is_in(category_ids.iter().copied()))
            .order_by_asc(service::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        for row in rows {
            grouped.entry(row.category_id).or_default().push(row.into());
        }
        Ok(grouped)
    }

    async fn create(&self, category_id: i32, name: &str, description: Option<&str>) -> Result<LeafRecord, ServiceError> {
        let created = service::create(&self.db, category_id, name, description).await?;
        Ok(created.into())
    }

    async fn delete_by_category_id(&self, category_id: i32) -> Result<u64, ServiceError> {
        let res = service::Entity::delete_many()
            .filter(service::Column::CategoryId.eq(category_id))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn leaf_records_grouped_by_category() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = models::service_category::insert(&db, "A", None, None).await?;
        let b = models::service_category::insert(&db, "B", None, None).await?;
        let repo = SeaOrmLeafRecordRepository { db: db.clone() };

        repo.create(a.id, "a1", None).await?;
        repo.create(a.id, "a2", Some("second")).await?;
        repo.create(b.id, "b1", None).await?;

        let for_a = repo.find_by_category_id(a.id).await?;
        assert_eq!(for_a.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), vec!["a1", "a2"]);

        let grouped = repo.find_by_category_ids(&[a.id, b.id]).await?;
        assert_eq!(grouped[&a.id].len(), 2);
        assert_eq!(grouped[&b.id].len(), 1);
        assert!(repo.find_by_category_ids(&[]).await?.is_empty());

        assert_eq!(repo.delete_by_category_id(a.id).await?, 2);
        assert!(repo.find_by_category_id(a.id).await?.is_empty());
        Ok(())
    }
}
