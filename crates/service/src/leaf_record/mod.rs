//! Leaf records ("services") attached to categories.
//!
//! Owned by a separate collaborator: the category core only reads them for
//! its views, and never deletes or reassigns them itself.

pub mod domain;
pub mod repository;
pub mod repo;

pub use domain::LeafRecord;
pub use repository::LeafRecordRepository;
