//! Statistics Engine over a built forest.

use super::domain::CategoryStatistics;
use super::tree::Forest;

/// Counts and depth of the forest. Roots are depth 0; an empty forest
/// yields all zeros.
pub fn compute(forest: &Forest) -> CategoryStatistics {
    let mut stats = CategoryStatistics {
        total_count: forest.len(),
        root_count: forest.root_indices().len(),
        ..CategoryStatistics::default()
    };

    let mut stack: Vec<(usize, usize)> = forest.root_indices().iter().map(|&r| (r, 0)).collect();
    while let Some((idx, depth)) = stack.pop() {
        stats.max_depth = stats.max_depth.max(depth);
        let kids = forest.child_indices(idx);
        if !kids.is_empty() {
            stats.count_with_children += 1;
        }
        stack.extend(kids.iter().map(|&c| (c, depth + 1)));
    }
    stats
}
