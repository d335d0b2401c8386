use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A service offered under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafRecord {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<models::service::Model> for LeafRecord {
    fn from(m: models::service::Model) -> Self {
        Self {
            id: m.id,
            category_id: m.category_id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
