use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, info, instrument};

use super::ancestry::is_descendant;
use super::domain::{Category, CategoryChanges, CategoryId, CategoryNode, CategoryStatistics, NewCategory};
use super::errors::CategoryError;
use super::store::{self, CategoryFilter};
use super::stats;
use super::tree::Forest;
use crate::leaf_record::{LeafRecord, LeafRecordRepository};

/// Category service configuration
#[derive(Clone, Debug)]
pub struct CategoryConfig {
    /// Levels loaded below a node when the caller does not say.
    pub max_subtree_depth: u32,
}

impl Default for CategoryConfig {
    fn default() -> Self { Self { max_subtree_depth: 10 } }
}

/// Mutation coordinator and read paths for the category tree.
///
/// Each mutation runs its validation reads and its write in one
/// transaction; an error drops the transaction, which rolls it back.
pub struct CategoryService {
    db: DatabaseConnection,
    leaf_records: Arc<dyn LeafRecordRepository>,
    cfg: CategoryConfig,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection, leaf_records: Arc<dyn LeafRecordRepository>, cfg: CategoryConfig) -> Self {
        Self { db, leaf_records, cfg }
    }

    /// Create a category under `parent_id`, or at the root level.
    #[instrument(skip(self, input), fields(name = %input.name, parent_id = ?input.parent_id))]
    pub async fn create(&self, input: NewCategory) -> Result<Category, CategoryError> {
        let name = validate_name(&input.name)?;

        let txn = self.db.begin().await?;
        if let Some(parent_id) = input.parent_id {
            require_parent(&txn, parent_id).await?;
        }
        ensure_unique_name(&txn, &name, input.parent_id, None).await?;
        let created = store::insert(&txn, &name, input.image, input.parent_id).await?;
        txn.commit().await?;

        info!(category_id = created.id, parent_id = ?created.parent_id, "category_created");
        Ok(created)
    }

    /// The category with its leaf records and direct children.
    pub async fn get(&self, id: CategoryId) -> Result<CategoryNode, CategoryError> {
        self.get_with_children(id, Some(1)).await
    }

    /// Every category, flat, ordered by id.
    pub async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        store::list(&self.db, &CategoryFilter::all()).await
    }

    /// Categories without parent, each with direct children and leaf records.
    pub async fn list_roots(&self) -> Result<Vec<CategoryNode>, CategoryError> {
        let mut rows = store::list(&self.db, &CategoryFilter::roots()).await?;
        let root_ids: Vec<CategoryId> = rows.iter().map(|c| c.id).collect();
        rows.extend(store::list(&self.db, &CategoryFilter::children_of_any(root_ids)).await?);
        let services = self.services_for(&rows).await?;
        Ok(Forest::build(rows).into_trees(services))
    }

    /// The whole forest, loaded with one category query and one leaf-record query.
    pub async fn tree(&self) -> Result<Vec<CategoryNode>, CategoryError> {
        let rows = store::list(&self.db, &CategoryFilter::all()).await?;
        let services = self.services_for(&rows).await?;
        let forest = Forest::build(rows);
        debug!(total = forest.len(), "category tree built");
        Ok(forest.into_trees(services))
    }

    /// One node and its descendants down to `max_depth` levels, one query per
    /// level. Deeper levels are silently left unloaded.
    #[instrument(skip(self))]
    pub async fn get_with_children(&self, id: CategoryId, max_depth: Option<u32>) -> Result<CategoryNode, CategoryError> {
        let depth = max_depth.unwrap_or(self.cfg.max_subtree_depth);
        let root = store::require(&self.db, id).await?;

        let mut seen: HashSet<CategoryId> = HashSet::from([root.id]);
        let mut frontier = vec![root.id];
        let mut rows = vec![root];
        for _ in 0..depth {
            if frontier.is_empty() { break; }
            let level = store::list(&self.db, &CategoryFilter::children_of_any(frontier)).await?;
            frontier = Vec::with_capacity(level.len());
            for c in level {
                if seen.insert(c.id) {
                    frontier.push(c.id);
                    rows.push(c);
                }
            }
        }

        let services = self.services_for(&rows).await?;
        Forest::rooted_at(rows, id)
            .into_trees(services)
            .pop()
            .ok_or_else(|| CategoryError::category_not_found(id))
    }

    /// Apply `changes`. Parent is only reassigned when `changes.parent_id`
    /// is present; `Some(None)` moves the category to the root level.
    #[instrument(skip(self, changes), fields(category_id = id))]
    pub async fn update(&self, id: CategoryId, changes: CategoryChanges) -> Result<Category, CategoryError> {
        let name = changes.name.as_deref().map(validate_name).transpose()?;

        let txn = self.db.begin().await?;
        let mut category = store::require_locked(&txn, id).await?;
        if let Some(parent_id) = changes.parent_id {
            validate_new_parent(&txn, id, parent_id).await?;
        }

        let target_parent = changes.parent_id.unwrap_or(category.parent_id);
        let parent_changed = target_parent != category.parent_id;
        if name.is_some() || parent_changed {
            let effective = name.as_deref().unwrap_or(&category.name);
            ensure_unique_name(&txn, effective, target_parent, Some(id)).await?;
        }

        if let Some(name) = name { category.name = name; }
        if let Some(image) = changes.image { category.image = image; }
        category.parent_id = target_parent;
        let updated = store::save(&txn, category).await?;
        txn.commit().await?;

        info!(category_id = id, parent_id = ?updated.parent_id, "category_updated");
        Ok(updated)
    }

    /// Reparent a category. The moved row and every row on the new parent's
    /// ancestor chain are locked for the transaction, so two opposing moves
    /// serialize and the second one sees the first one's write. On Postgres
    /// the pair may instead deadlock; the database aborts one of them and it
    /// surfaces as `Unavailable`.
    #[instrument(skip(self), fields(category_id = id))]
    pub async fn move_category(&self, id: CategoryId, new_parent_id: Option<CategoryId>) -> Result<Category, CategoryError> {
        let txn = self.db.begin().await?;
        let mut category = store::require_locked(&txn, id).await?;
        validate_new_parent(&txn, id, new_parent_id).await?;

        if category.parent_id == new_parent_id {
            txn.commit().await?;
            debug!(category_id = id, "category already under requested parent");
            return Ok(category);
        }
        ensure_unique_name(&txn, &category.name, new_parent_id, Some(id)).await?;

        let from = category.parent_id;
        category.parent_id = new_parent_id;
        let moved = store::save(&txn, category).await?;
        txn.commit().await?;

        info!(category_id = id, from = ?from, to = ?new_parent_id, "category_moved");
        Ok(moved)
    }

    /// Delete a childless category. Leaf records are not touched; if any
    /// remain the database rejects the delete with `ConstraintViolation`.
    #[instrument(skip(self), fields(category_id = id))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), CategoryError> {
        let txn = self.db.begin().await?;
        store::require_locked(&txn, id).await?;
        if store::count(&txn, &CategoryFilter::children_of(id)).await? > 0 {
            return Err(CategoryError::HasChildren);
        }
        store::delete(&txn, id).await?;
        txn.commit().await?;

        info!(category_id = id, "category_deleted");
        Ok(())
    }

    pub async fn statistics(&self) -> Result<CategoryStatistics, CategoryError> {
        let rows = store::list(&self.db, &CategoryFilter::all()).await?;
        Ok(stats::compute(&Forest::build(rows)))
    }

    /// Leaf records of one existing category.
    pub async fn services_of(&self, id: CategoryId) -> Result<Vec<LeafRecord>, CategoryError> {
        store::require(&self.db, id).await?;
        Ok(self.leaf_records.find_by_category_id(id).await?)
    }

    async fn services_for(&self, rows: &[Category]) -> Result<HashMap<CategoryId, Vec<LeafRecord>>, CategoryError> {
        let ids: Vec<CategoryId> = rows.iter().map(|c| c.id).collect();
        Ok(self.leaf_records.find_by_category_ids(&ids).await?)
    }
}

fn validate_name(name: &str) -> Result<String, CategoryError> {
    models::service_category::validate_name(name).map_err(|_| CategoryError::InvalidName)
}

async fn require_parent(txn: &DatabaseTransaction, parent_id: CategoryId) -> Result<Category, CategoryError> {
    store::get_locked(txn, parent_id).await?.ok_or_else(|| CategoryError::parent_not_found(parent_id))
}

/// Checks for placing `id` under `parent_id`; `None` (root level) always passes.
async fn validate_new_parent(
    txn: &DatabaseTransaction,
    id: CategoryId,
    parent_id: Option<CategoryId>,
) -> Result<(), CategoryError> {
    let Some(parent_id) = parent_id else { return Ok(()) };
    if parent_id == id {
        return Err(CategoryError::SelfParent);
    }
    if is_descendant(txn, id, parent_id).await? {
        return Err(CategoryError::CircularReference);
    }
    require_parent(txn, parent_id).await?;
    Ok(())
}

async fn ensure_unique_name(
    txn: &DatabaseTransaction,
    name: &str,
    parent_id: Option<CategoryId>,
    exclude_id: Option<CategoryId>,
) -> Result<(), CategoryError> {
    let filter = CategoryFilter::siblings_named(parent_id, name, exclude_id);
    if store::count(txn, &filter).await? > 0 {
        return Err(CategoryError::DuplicateName { name: name.to_string() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{category_service, category_service_with_mock};

    fn new(name: &str, parent_id: Option<CategoryId>) -> NewCategory {
        NewCategory { name: name.into(), parent_id, image: None }
    }

    /// Root "A", child "B" under A, child "C" under B.
    async fn chain(svc: &CategoryService) -> Result<(Category, Category, Category), CategoryError> {
        let a = svc.create(new("A", None)).await?;
        let b = svc.create(new("B", Some(a.id))).await?;
        let c = svc.create(new("C", Some(b.id))).await?;
        Ok((a, b, c))
    }

    #[tokio::test]
    async fn create_trims_and_validates_name() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let a = svc.create(NewCategory { name: "  Home  ".into(), parent_id: None, image: Some("/uploads/x.png".into()) }).await?;
        assert_eq!(a.name, "Home");
        assert_eq!(a.image.as_deref(), Some("/uploads/x.png"));

        assert!(matches!(svc.create(new("   ", None)).await, Err(CategoryError::InvalidName)));
        assert!(matches!(svc.create(new("", None)).await, Err(CategoryError::InvalidName)));
        Ok(())
    }

    #[tokio::test]
    async fn create_under_missing_parent_is_not_found() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let err = svc.create(new("X", Some(77))).await.unwrap_err();
        assert!(matches!(err, CategoryError::NotFound { id: 77, .. }));
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_names_rejected_per_sibling_group() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let a = svc.create(new("A", None)).await?;
        let d = svc.create(new("D", None)).await?;

        svc.create(new("Same", Some(a.id))).await?;
        let err = svc.create(new(" Same ", Some(a.id))).await.unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateName { ref name } if name == "Same"));

        // different parent, and the root group, are separate sibling groups
        svc.create(new("Same", Some(d.id))).await?;
        svc.create(new("Same", None)).await?;
        assert!(matches!(svc.create(new("Same", None)).await, Err(CategoryError::DuplicateName { .. })));

        // comparison is case-sensitive
        svc.create(new("same", Some(a.id))).await?;
        Ok(())
    }

    #[tokio::test]
    async fn statistics_of_a_chain() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        assert_eq!(svc.statistics().await?, CategoryStatistics::default());

        chain(&svc).await?;
        let stats = svc.statistics().await?;
        assert_eq!(stats, CategoryStatistics { total_count: 3, root_count: 1, max_depth: 2, count_with_children: 2 });
        Ok(())
    }

    #[tokio::test]
    async fn move_under_own_grandchild_is_circular() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let (a, b, c) = chain(&svc).await?;

        let err = svc.move_category(a.id, Some(c.id)).await.unwrap_err();
        assert!(matches!(err, CategoryError::CircularReference));
        assert_eq!(svc.get(a.id).await?.category.parent_id, None);

        assert!(matches!(svc.move_category(a.id, Some(b.id)).await, Err(CategoryError::CircularReference)));
        assert!(matches!(svc.move_category(b.id, Some(c.id)).await, Err(CategoryError::CircularReference)));
        Ok(())
    }

    #[tokio::test]
    async fn move_to_self_is_self_parent() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let a = svc.create(new("A", None)).await?;
        assert!(matches!(svc.move_category(a.id, Some(a.id)).await, Err(CategoryError::SelfParent)));
        Ok(())
    }

    #[tokio::test]
    async fn move_reparents_and_detaches() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let (a, b, c) = chain(&svc).await?;
        let d = svc.create(new("D", None)).await?;

        let moved = svc.move_category(c.id, Some(d.id)).await?;
        assert_eq!(moved.parent_id, Some(d.id));

        let detached = svc.move_category(b.id, None).await?;
        assert_eq!(detached.parent_id, None);

        let stats = svc.statistics().await?;
        assert_eq!(stats.root_count, 3);
        assert_eq!(stats.max_depth, 1);
        assert!(svc.get(a.id).await?.children.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn move_missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let a = svc.create(new("A", None)).await?;
        assert!(matches!(svc.move_category(404, None).await, Err(CategoryError::NotFound { id: 404, .. })));
        assert!(matches!(svc.move_category(a.id, Some(404)).await, Err(CategoryError::NotFound { id: 404, .. })));
        assert_eq!(svc.get(a.id).await?.category.parent_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn move_keeps_sibling_names_unique() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let a = svc.create(new("A", None)).await?;
        svc.create(new("X", Some(a.id))).await?;
        let x = svc.create(new("X", None)).await?;

        let err = svc.move_category(x.id, Some(a.id)).await.unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateName { .. }));
        assert_eq!(svc.get(x.id).await?.category.parent_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_without_parent_keeps_parent() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let (a, b, _) = chain(&svc).await?;

        let changes = CategoryChanges { name: Some("B2".into()), ..CategoryChanges::default() };
        let updated = svc.update(b.id, changes).await?;
        assert_eq!(updated.name, "B2");
        assert_eq!(updated.parent_id, Some(a.id));
        Ok(())
    }

    #[tokio::test]
    async fn update_with_explicit_null_parent_detaches() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let (_, b, _) = chain(&svc).await?;

        let changes = CategoryChanges { parent_id: Some(None), ..CategoryChanges::default() };
        let updated = svc.update(b.id, changes).await?;
        assert_eq!(updated.parent_id, None);
        assert_eq!(updated.name, "B");
        Ok(())
    }

    #[tokio::test]
    async fn update_validates_parent_and_name() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let (a, b, c) = chain(&svc).await?;
        svc.create(new("Other", Some(a.id))).await?;

        let self_parent = CategoryChanges { parent_id: Some(Some(b.id)), ..CategoryChanges::default() };
        assert!(matches!(svc.update(b.id, self_parent).await, Err(CategoryError::SelfParent)));

        let circular = CategoryChanges { parent_id: Some(Some(c.id)), ..CategoryChanges::default() };
        assert!(matches!(svc.update(a.id, circular).await, Err(CategoryError::CircularReference)));

        let blank = CategoryChanges { name: Some("  ".into()), ..CategoryChanges::default() };
        assert!(matches!(svc.update(b.id, blank).await, Err(CategoryError::InvalidName)));

        let clash = CategoryChanges { name: Some("Other".into()), ..CategoryChanges::default() };
        assert!(matches!(svc.update(b.id, clash).await, Err(CategoryError::DuplicateName { .. })));

        // keeping its own name is not a clash
        let same = CategoryChanges { name: Some("B".into()), ..CategoryChanges::default() };
        svc.update(b.id, same).await?;

        assert!(matches!(svc.update(999, CategoryChanges::default()).await, Err(CategoryError::NotFound { .. })));

        let unchanged = svc.get(b.id).await?.category;
        assert_eq!(unchanged.name, "B");
        assert_eq!(unchanged.parent_id, Some(a.id));
        Ok(())
    }

    #[tokio::test]
    async fn update_renames_against_new_parent() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let a = svc.create(new("A", None)).await?;
        let d = svc.create(new("D", None)).await?;
        let x = svc.create(new("X", Some(a.id))).await?;
        svc.create(new("Y", Some(d.id))).await?;

        let clash = CategoryChanges { name: Some("Y".into()), parent_id: Some(Some(d.id)), ..CategoryChanges::default() };
        assert!(matches!(svc.update(x.id, clash).await, Err(CategoryError::DuplicateName { .. })));

        let ok = CategoryChanges { name: Some("Z".into()), parent_id: Some(Some(d.id)), image: Some(Some("/i.png".into())) };
        let updated = svc.update(x.id, ok).await?;
        assert_eq!((updated.name.as_str(), updated.parent_id), ("Z", Some(d.id)));
        assert_eq!(updated.image.as_deref(), Some("/i.png"));

        let cleared = svc.update(x.id, CategoryChanges { image: Some(None), ..CategoryChanges::default() }).await?;
        assert_eq!(cleared.image, None);
        Ok(())
    }

    #[tokio::test]
    async fn delete_requires_childless_node() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service().await?;
        let (a, b, c) = chain(&svc).await?;

        assert!(matches!(svc.delete(a.id).await, Err(CategoryError::HasChildren)));
        assert!(matches!(svc.delete(b.id).await, Err(CategoryError::HasChildren)));

        svc.delete(c.id).await?;
        assert!(matches!(svc.get(c.id).await, Err(CategoryError::NotFound { .. })));
        assert!(matches!(svc.delete(c.id).await, Err(CategoryError::NotFound { .. })));
        svc.delete(b.id).await?;
        svc.delete(a.id).await?;
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_with_leaf_records_is_constraint_violation() -> Result<(), anyhow::Error> {
        let (svc, leaf) = category_service().await?;
        let a = svc.create(new("A", None)).await?;
        leaf.create(a.id, "Service", None).await?;

        let err = svc.delete(a.id).await.unwrap_err();
        assert!(matches!(err, CategoryError::ConstraintViolation(_)), "got {err:?}");
        assert!(svc.get(a.id).await.is_ok());

        // the collaborator clears its records, then the delete goes through
        assert_eq!(leaf.delete_by_category_id(a.id).await?, 1);
        svc.delete(a.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn tree_and_views_carry_services() -> Result<(), anyhow::Error> {
        let (svc, leaf) = category_service_with_mock().await?;
        let (a, b, c) = chain(&svc).await?;
        let d = svc.create(new("D", None)).await?;
        leaf.create(b.id, "Fix taps", None).await?;
        leaf.create(c.id, "Unblock drains", Some("same day")).await?;

        let tree = svc.tree().await?;
        assert_eq!(tree.iter().map(CategoryNode::id).collect::<Vec<_>>(), vec![a.id, d.id]);
        assert_eq!(tree.iter().map(CategoryNode::size).sum::<usize>(), 4);
        let b_node = &tree[0].children[0];
        assert_eq!(b_node.services.len(), 1);
        assert_eq!(b_node.children[0].services[0].name, "Unblock drains");

        let got = svc.get(a.id).await?;
        assert_eq!(got.children.len(), 1);
        assert!(got.children[0].children.is_empty());

        let roots = svc.list_roots().await?;
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].children[0].services.len(), 1);

        assert_eq!(svc.services_of(c.id).await?.len(), 1);
        assert!(matches!(svc.services_of(999).await, Err(CategoryError::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn subtree_depth_is_bounded() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service_with_mock().await?;
        let mut parent = None;
        let mut ids = Vec::new();
        for i in 0..14 {
            let c = svc.create(new(&format!("L{i}"), parent)).await?;
            parent = Some(c.id);
            ids.push(c.id);
        }

        fn depth(node: &CategoryNode) -> usize {
            node.children.iter().map(|c| 1 + depth(c)).max().unwrap_or(0)
        }

        assert_eq!(depth(&svc.get_with_children(ids[0], None).await?), 10);
        assert_eq!(depth(&svc.get_with_children(ids[0], Some(3)).await?), 3);
        assert_eq!(depth(&svc.get_with_children(ids[0], Some(0)).await?), 0);
        assert_eq!(depth(&svc.get_with_children(ids[10], Some(50)).await?), 3);
        assert!(matches!(svc.get_with_children(999, None).await, Err(CategoryError::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn every_descendant_pair_rejects_inverse_move() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service_with_mock().await?;
        let r = svc.create(new("R", None)).await?;
        let l = svc.create(new("L", Some(r.id))).await?;
        let rr = svc.create(new("RR", Some(r.id))).await?;
        let ll = svc.create(new("LL", Some(l.id))).await?;
        let lll = svc.create(new("LLL", Some(ll.id))).await?;

        let pairs = [(r.id, l.id), (r.id, rr.id), (r.id, ll.id), (r.id, lll.id), (l.id, ll.id), (l.id, lll.id), (ll.id, lll.id)];
        for (ancestor, descendant) in pairs {
            let err = svc.move_category(ancestor, Some(descendant)).await.unwrap_err();
            assert!(matches!(err, CategoryError::CircularReference), "{ancestor} under {descendant}: {err:?}");
        }
        // siblings and cousins are fine
        svc.move_category(rr.id, Some(lll.id)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn opposing_concurrent_moves_never_form_a_cycle() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service_with_mock().await?;
        let x = svc.create(new("X", None)).await?;
        let y = svc.create(new("Y", None)).await?;

        let (first, second) = tokio::join!(
            svc.move_category(x.id, Some(y.id)),
            svc.move_category(y.id, Some(x.id)),
        );
        let rejected: Vec<_> = [first, second].into_iter().filter_map(Result::err).collect();
        assert_eq!(rejected.len(), 1, "{rejected:?}");
        assert!(matches!(rejected[0], CategoryError::CircularReference));

        // both rows still hang off a single root
        let tree = svc.tree().await?;
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].size(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_ring_of_moves_leaves_a_forest() -> Result<(), anyhow::Error> {
        let (svc, _) = category_service_with_mock().await?;
        let a = svc.create(new("A", None)).await?;
        let b = svc.create(new("B", None)).await?;
        let c = svc.create(new("C", None)).await?;

        let results = tokio::join!(
            svc.move_category(a.id, Some(b.id)),
            svc.move_category(b.id, Some(c.id)),
            svc.move_category(c.id, Some(a.id)),
        );
        let outcomes = [results.0.is_ok(), results.1.is_ok(), results.2.is_ok()];
        assert!(outcomes.iter().any(|ok| !ok), "a ring of three moves cannot all succeed");

        let stats = svc.statistics().await?;
        assert_eq!(stats.total_count, 3);
        assert_eq!(svc.tree().await?.iter().map(CategoryNode::size).sum::<usize>(), 3);
        assert!(stats.root_count >= 1);
        Ok(())
    }
}
