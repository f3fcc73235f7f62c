use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::model::MovieRecord;

pub const FAVORITES_FILE: &str = "favorites.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("No favorites file at {0}")]
    NotFound(PathBuf),
    #[error("Storage unavailable at {0}: {1}")]
    StorageUnavailable(PathBuf, std::io::Error),
    #[error("Failed to parse {0}: {1}")]
    Parse(PathBuf, serde_json::Error),
    #[error("Failed to encode favorites: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Durable storage for the full favorites collection.
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    async fn load(&self) -> PersistResult<Vec<MovieRecord>>;
    async fn save(&self, records: &[MovieRecord]) -> PersistResult<()>;
}

/// Keeps the collection as a JSON array in a single file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(datadir: impl AsRef<Path>) -> Self {
        Self::new(datadir.as_ref().join(FAVORITES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, e: std::io::Error) -> PersistError {
        PersistError::StorageUnavailable(self.path.clone(), e)
    }
}

#[async_trait]
impl FavoritesBackend for JsonFileBackend {
    async fn load(&self) -> PersistResult<Vec<MovieRecord>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(self.unavailable(e)),
        };

        serde_json::from_slice(&content).map_err(|e| PersistError::Parse(self.path.clone(), e))
    }

    async fn save(&self, records: &[MovieRecord]) -> PersistResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| self.unavailable(e))?;

        let content = serde_json::to_vec_pretty(records)?;

        // Write next to the target and rename, so readers never see a torn file.
        let tmp_file = dir.join(format!(".favorites-{}.tmp", uuid::Uuid::new_v4()));
        let written = match tokio::fs::write(&tmp_file, &content).await {
            Ok(()) => tokio::fs::rename(&tmp_file, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            // A partial write or failed rename must not leave temp files behind.
            let _ = tokio::fs::remove_file(&tmp_file).await;
            return Err(self.unavailable(e));
        }

        debug!("Saved {} favorites to {}", records.len(), self.path.display());
        Ok(())
    }
}
