use std::collections::HashMap;

use async_trait::async_trait;

use super::domain::LeafRecord;
use crate::errors::ServiceError;

/// Repository abstraction for leaf-record persistence.
#[async_trait]
pub trait LeafRecordRepository: Send + Sync {
    async fn find_by_category_id(&self, category_id: i32) -> Result<Vec<LeafRecord>, ServiceError>;

    /// Records for many categories in one round trip, grouped by category id.
    async fn find_by_category_ids(&self, category_ids: &[i32]) -> Result<HashMap<i32, Vec<LeafRecord>>, ServiceError>;

    async fn create(&self, category_id: i32, name: &str, description: Option<&str>) -> Result<LeafRecord, ServiceError>;

    /// Remove every record of a category; returns how many were removed.
    async fn delete_by_category_id(&self, category_id: i32) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockLeafRecordRepository {
        records: Mutex<Vec<LeafRecord>>,
    }

    #[async_trait]
    impl LeafRecordRepository for MockLeafRecordRepository {
        async fn find_by_category_id(&self, category_id: i32) -> Result<Vec<LeafRecord>, ServiceError> {
            let records = self.records.lock().unwrap();
            Ok(records.iter().filter(|r| r.category_id == category_id).cloned().collect())
        }

        async fn find_by_category_ids(&self, category_ids: &[i32]) -> Result<HashMap<i32, Vec<LeafRecord>>, ServiceError> {
            let records = self.records.lock().unwrap();
            let mut grouped: HashMap<i32, Vec<LeafRecord>> = HashMap::new();
            for r in records.iter().filter(|r| category_ids.contains(&r.category_id)) {
                grouped.entry(r.category_id).or_default().push(r.clone());
            }
            Ok(grouped)
        }

        /// # Examples
        /// ```
        /// use service::leaf_record::repository::{LeafRecordRepository, mock::MockLeafRecordRepository};
        /// let repo = MockLeafRecordRepository::default();
        /// let rec = tokio_test::block_on(repo.create(7, "Window cleaning", None)).unwrap();
        /// assert_eq!(rec.category_id, 7);
        /// let found = tokio_test::block_on(repo.find_by_category_id(7)).unwrap();
        /// assert_eq!(found.len(), 1);
        /// ```
        async fn create(&self, category_id: i32, name: &str, description: Option<&str>) -> Result<LeafRecord, ServiceError> {
            if name.trim().is_empty() {
                return Err(ServiceError::Validation("service name required".into()));
            }
            let mut records = self.records.lock().unwrap();
            let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let rec = LeafRecord {
                id,
                category_id,
                name: name.trim().to_string(),
                description: description.map(str::to_string),
                created_at: chrono::Utc::now().into(),
            };
            records.push(rec.clone());
            Ok(rec)
        }

        async fn delete_by_category_id(&self, category_id: i32) -> Result<u64, ServiceError> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.category_id != category_id);
            Ok((before - records.len()) as u64)
        }
    }
}
