//! Service layer owning the service-category tree.
//! - Category Store, ancestry checks, tree building and statistics under `category`.
//! - Mutations go through `category::CategoryService`, one transaction per call.
//! - Leaf records and uploaded images are collaborators behind narrow interfaces.

pub mod errors;
pub mod category;
pub mod leaf_record;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use category::{CategoryError, CategoryService};
