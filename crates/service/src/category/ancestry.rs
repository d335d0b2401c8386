//! Ancestry Checker: walks parent links upward, one node at a time.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction};
use tracing::warn;

use super::domain::CategoryId;
use super::errors::CategoryError;
use super::store;

/// Source of parent links for the ancestry walk.
#[async_trait]
pub trait ParentLookup: Send + Sync {
    /// `None` when the node does not exist, `Some(None)` for a root.
    async fn parent_of(&self, id: CategoryId) -> Result<Option<Option<CategoryId>>, CategoryError>;
}

#[async_trait]
impl ParentLookup for DatabaseConnection {
    async fn parent_of(&self, id: CategoryId) -> Result<Option<Option<CategoryId>>, CategoryError> {
        Ok(store::get(self, id).await?.map(|c| c.parent_id))
    }
}

/// Inside a transaction every row on the walked chain stays locked until
/// commit, so a concurrent reparent of any ancestor waits for this one.
#[async_trait]
impl ParentLookup for DatabaseTransaction {
    async fn parent_of(&self, id: CategoryId) -> Result<Option<Option<CategoryId>>, CategoryError> {
        Ok(store::get_locked(self, id).await?.map(|c| c.parent_id))
    }
}

#[async_trait]
impl ParentLookup for HashMap<CategoryId, Option<CategoryId>> {
    async fn parent_of(&self, id: CategoryId) -> Result<Option<Option<CategoryId>>, CategoryError> {
        Ok(self.get(&id).copied())
    }
}

/// Whether `candidate` sits somewhere below `ancestor`.
///
/// A node is never its own descendant. Revisiting a node means the stored
/// links already contain a cycle; the walk then stops and answers `false`.
pub async fn is_descendant<L>(lookup: &L, ancestor: CategoryId, candidate: CategoryId) -> Result<bool, CategoryError>
where
    L: ParentLookup + ?Sized,
{
    let mut visited = HashSet::new();
    let mut current = candidate;
    loop {
        if !visited.insert(current) {
            warn!(ancestor, candidate, revisited = current, "cycle in stored category parents");
            return Ok(false);
        }
        match lookup.parent_of(current).await? {
            Some(Some(parent)) if parent == ancestor => return Ok(true),
            Some(Some(parent)) => current = parent,
            _ => return Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(pairs: &[(CategoryId, Option<CategoryId>)]) -> HashMap<CategoryId, Option<CategoryId>> {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn finds_direct_and_transitive_descendants() {
        // 1 -> 2 -> 3, 4 is a separate root
        let map = links(&[(1, None), (2, Some(1)), (3, Some(2)), (4, None)]);
        assert!(is_descendant(&map, 1, 2).await.unwrap());
        assert!(is_descendant(&map, 1, 3).await.unwrap());
        assert!(is_descendant(&map, 2, 3).await.unwrap());
        assert!(!is_descendant(&map, 3, 1).await.unwrap());
        assert!(!is_descendant(&map, 4, 3).await.unwrap());
    }

    #[tokio::test]
    async fn node_is_not_its_own_descendant() {
        let map = links(&[(1, None), (2, Some(1)), (3, Some(2))]);
        for id in 1..=3 {
            assert!(!is_descendant(&map, id, id).await.unwrap());
        }
    }

    #[tokio::test]
    async fn unknown_nodes_are_not_descendants() {
        let map = links(&[(1, None)]);
        assert!(!is_descendant(&map, 1, 99).await.unwrap());
        // dangling parent link
        let map = links(&[(5, Some(6))]);
        assert!(!is_descendant(&map, 1, 5).await.unwrap());
    }

    #[tokio::test]
    async fn terminates_on_corrupted_cycle() {
        // 2 -> 3 -> 4 -> 2, none of them below 1
        let map = links(&[(1, None), (2, Some(4)), (3, Some(2)), (4, Some(3))]);
        assert!(!is_descendant(&map, 1, 2).await.unwrap());
        assert!(!is_descendant(&map, 1, 3).await.unwrap());
    }

    #[tokio::test]
    async fn walks_the_database() -> Result<(), anyhow::Error> {
        let db = crate::test_support::get_db().await?;
        let a = store::insert(&db, "A", None, None).await?;
        let b = store::insert(&db, "B", None, Some(a.id)).await?;
        let c = store::insert(&db, "C", None, Some(b.id)).await?;
        assert!(is_descendant(&db, a.id, c.id).await?);
        assert!(!is_descendant(&db, c.id, a.id).await?);
        Ok(())
    }
}
