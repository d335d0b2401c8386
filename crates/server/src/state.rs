use std::sync::Arc;

use service::{storage::ImageStore, CategoryService};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<CategoryService>,
    pub images: Arc<ImageStore>,
}

impl AppState {
    pub fn new(categories: CategoryService, images: ImageStore) -> Self {
        Self { categories: Arc::new(categories), images: Arc::new(images) }
    }
}
