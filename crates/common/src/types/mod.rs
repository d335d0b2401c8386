use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Path handed back after an upload, used verbatim as a category `image`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub path: String,
}
