//! Tree Builder: rebuilds the forest from one flat load of categories.
//!
//! Nodes live in an arena indexed by position; parent/child links are index
//! lists, so no node owns another until the final materialization.

use std::collections::HashMap;

use tracing::warn;

use super::domain::{Category, CategoryId, CategoryNode};
use crate::leaf_record::LeafRecord;

#[derive(Debug, Default)]
pub struct Forest {
    nodes: Vec<Category>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    index: HashMap<CategoryId, usize>,
}

impl Forest {
    /// Two passes: index every row, then hang each row under its parent.
    /// Rows whose parent is not in the set are promoted to roots.
    pub fn build(rows: Vec<Category>) -> Self {
        let (mut forest, orphans) = Self::link(rows);
        if !orphans.is_empty() {
            let ids: Vec<CategoryId> = orphans.iter().map(|&i| forest.nodes[i].id).collect();
            warn!(?ids, "categories reference missing parents; treating them as roots");
            forest.roots.extend(orphans);
        }
        forest.warn_unreachable();
        forest
    }

    /// Forest with `root` as its only root. Used for partial loads where
    /// the root's own parent is outside the loaded set.
    pub fn rooted_at(rows: Vec<Category>, root: CategoryId) -> Self {
        let (mut forest, _) = Self::link(rows);
        forest.roots = forest.index.get(&root).map(|&i| vec![i]).unwrap_or_default();
        forest
    }

    fn link(rows: Vec<Category>) -> (Self, Vec<usize>) {
        let index: HashMap<CategoryId, usize> = rows.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let mut children = vec![Vec::new(); rows.len()];
        let mut roots = Vec::new();
        let mut orphans = Vec::new();
        for (i, c) in rows.iter().enumerate() {
            match c.parent_id {
                None => roots.push(i),
                Some(p) => match index.get(&p) {
                    Some(&parent) => children[parent].push(i),
                    None => orphans.push(i),
                },
            }
        }
        (Self { nodes: rows, children, roots, index }, orphans)
    }

    fn warn_unreachable(&self) {
        let reachable = self.reachable_count();
        if reachable < self.nodes.len() {
            warn!(unreachable = self.nodes.len() - reachable, "categories caught in a parent cycle are left out of the tree");
        }
    }

    fn reachable_count(&self) -> usize {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack: Vec<usize> = self.roots.clone();
        let mut count = 0;
        while let Some(i) = stack.pop() {
            if std::mem::replace(&mut seen[i], true) { continue; }
            count += 1;
            stack.extend(self.children[i].iter().copied());
        }
        count
    }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub(crate) fn root_indices(&self) -> &[usize] { &self.roots }

    pub(crate) fn child_indices(&self, idx: usize) -> &[usize] { &self.children[idx] }

    /// Turn the arena into owned trees, attaching each node's leaf records.
    pub fn into_trees(self, mut services: HashMap<CategoryId, Vec<LeafRecord>>) -> Vec<CategoryNode> {
        let Forest { nodes, children, roots, .. } = self;
        let mut slots: Vec<Option<Category>> = nodes.into_iter().map(Some).collect();
        roots
            .iter()
            .filter_map(|&r| materialize(r, &mut slots, &children, &mut services))
            .collect()
    }
}

fn materialize(
    idx: usize,
    slots: &mut [Option<Category>],
    children: &[Vec<usize>],
    services: &mut HashMap<CategoryId, Vec<LeafRecord>>,
) -> Option<CategoryNode> {
    let category = slots[idx].take()?;
    let kids = children[idx]
        .iter()
        .filter_map(|&c| materialize(c, slots, children, services))
        .collect();
    Some(CategoryNode {
        services: services.remove(&category.id).unwrap_or_default(),
        category,
        children: kids,
    })
}
