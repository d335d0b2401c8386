//! Service-category tree: a mutable forest persisted in `service_category`.
//!
//! Layers, leaves first:
//! - `store`: reads and writes against any SeaORM connection or transaction.
//! - `ancestry`: cycle-safe "is B below A" walks over parent links.
//! - `tree`: two-pass forest reconstruction from one flat load.
//! - `stats`: aggregate metrics over a built forest.
//! - `service`: the mutation coordinator enforcing the tree invariants.

pub mod domain;
pub mod errors;
pub mod store;
pub mod ancestry;
pub mod tree;
pub mod stats;
pub mod service;

pub use domain::{Category, CategoryChanges, CategoryId, CategoryNode, CategoryStatistics, MoveCategory, NewCategory};
pub use errors::CategoryError;
pub use service::{CategoryConfig, CategoryService};
