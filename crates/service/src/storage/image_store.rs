use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;

/// File-backed store for category images.
///
/// Files get a random 32-hex-digit name and keep the original extension,
/// so two uploads of `logo.png` never collide.
#[derive(Clone, Debug)]
pub struct ImageStore {
    dir: PathBuf,
    public_prefix: String,
}

impl ImageStore {
    pub fn new<P: Into<PathBuf>>(dir: P, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into().trim_end_matches('/').to_string();
        Self { dir: dir.into(), public_prefix }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    /// Persist `bytes` and return the public URL, `{public_prefix}/{file}`.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, ServiceError> {
        if bytes.is_empty() {
            return Err(ServiceError::Validation("image file is empty".into()));
        }
        fs::create_dir_all(&self.dir).await?;

        let file_name = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", Uuid::new_v4().simple(), ext),
            None => Uuid::new_v4().simple().to_string(),
        };
        fs::write(self.dir.join(&file_name), bytes).await?;

        info!(file = %file_name, size = bytes.len(), "image_stored");
        Ok(format!("{}/{}", self.public_prefix, file_name))
    }
}

/// Lower-cased extension of `name`, if it is short and alphanumeric.
fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    let valid = !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}
