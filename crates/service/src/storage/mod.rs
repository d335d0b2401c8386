//! Storage abstractions for the service layer
//!
//! Uploaded category images live on the local filesystem; callers only
//! ever see the public URL returned by the store.

pub mod image_store;

pub use image_store::ImageStore;
