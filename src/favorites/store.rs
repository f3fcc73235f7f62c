use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use super::model::MovieRecord;
use super::persist::{FavoritesBackend, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Invalid movie id: {0:?}")]
    InvalidId(String),
}

/// The user's favorite movies, keyed by catalog id.
///
/// Every mutation that changes the collection is followed by a full
/// rewrite through the backend. A failed save is logged and the in-memory
/// state stays authoritative.
pub struct FavoritesStore {
    favorites: RwLock<HashMap<String, MovieRecord>>,
    backend: Arc<dyn FavoritesBackend>,
    // Held for the duration of a save; the snapshot is taken under it so
    // the last save to complete always carries the latest state.
    save_lock: Mutex<()>,
}

impl FavoritesStore {
    /// Load the collection from the backend. Missing or unreadable data
    /// results in an empty store.
    pub async fn initialize(backend: Arc<dyn FavoritesBackend>) -> Self {
        let favorites = match backend.load().await {
            Ok(records) => {
                let map: HashMap<String, MovieRecord> = records
                    .into_iter()
                    .map(|r| (r.id.clone(), r))
                    .collect();
                info!("Loaded {} favorites", map.len());
                map
            }
            Err(PersistError::NotFound(path)) => {
                info!("No favorites at {}, starting empty", path.display());
                HashMap::new()
            }
            Err(e) => {
                warn!("Could not load favorites, starting empty: {}", e);
                HashMap::new()
            }
        };

        Self {
            favorites: RwLock::new(favorites),
            backend,
            save_lock: Mutex::new(()),
        }
    }

    pub async fn add(&self, record: MovieRecord) -> Result<(), FavoritesError> {
        if record.id.trim().is_empty() {
            return Err(FavoritesError::InvalidId(record.id));
        }

        {
            let mut favorites = self.favorites.write().await;
            info!("Adding favorite {} ({})", record.id, record.title);
            favorites.insert(record.id.clone(), record);
        }

        self.persist().await;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut favorites = self.favorites.write().await;
            favorites.remove(id).is_some()
        };

        if removed {
            info!("Removed favorite {}", id);
            self.persist().await;
        }
        removed
    }

    pub async fn list(&self) -> Vec<MovieRecord> {
        let favorites = self.favorites.read().await;
        favorites.values().cloned().collect()
    }

    pub async fn contains(&self, id: &str) -> bool {
        let favorites = self.favorites.read().await;
        favorites.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.favorites.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.favorites.read().await.is_empty()
    }

    async fn persist(&self) {
        let _guard = self.save_lock.lock().await;
        let snapshot = self.list().await;
        if let Err(e) = self.backend.save(&snapshot).await {
            error!("Failed to save favorites: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::persist::{JsonFileBackend, PersistResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that remembers the last save and can be told to fail.
    #[derive(Default)]
    struct MemoryBackend {
        saved: std::sync::Mutex<Option<Vec<MovieRecord>>>,
        saves: AtomicUsize,
        fail_saves: bool,
    }

    #[async_trait]
    impl FavoritesBackend for MemoryBackend {
        async fn load(&self) -> PersistResult<Vec<MovieRecord>> {
            match self.saved.lock().unwrap().clone() {
                Some(records) => Ok(records),
                None => Err(PersistError::NotFound("memory".into())),
            }
        }

        async fn save(&self, records: &[MovieRecord]) -> PersistResult<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_saves {
                return Err(PersistError::StorageUnavailable(
                    "memory".into(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            *self.saved.lock().unwrap() = Some(records.to_vec());
            Ok(())
        }
    }

    fn dark_knight() -> MovieRecord {
        MovieRecord::new("tt0468569", "The Dark Knight", "2008", "https://example.com/poster.jpg")
    }

    fn ryan() -> MovieRecord {
        MovieRecord::new("tt0120815", "Saving Private Ryan", "1998", "https://example.com/poster2.jpg")
    }

    async fn memory_store() -> (Arc<MemoryBackend>, FavoritesStore) {
        let backend = Arc::new(MemoryBackend::default());
        let store = FavoritesStore::initialize(backend.clone()).await;
        (backend, store)
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let (_, store) = memory_store().await;
        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (_, store) = memory_store().await;
        store.add(dark_knight()).await.unwrap();
        store.add(dark_knight()).await.unwrap();

        assert_eq!(store.list().await, vec![dark_knight()]);
    }

    #[tokio::test]
    async fn test_add_overwrites_same_id() {
        let (_, store) = memory_store().await;
        store.add(dark_knight()).await.unwrap();

        let mut updated = dark_knight();
        updated.title = "Updated Title".to_string();
        updated.poster_url = "N/A".to_string();
        store.add(updated.clone()).await.unwrap();

        let favorites = store.list().await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0], updated);
    }

    #[tokio::test]
    async fn test_add_rejects_empty_id() {
        let (backend, store) = memory_store().await;
        let result = store.add(MovieRecord::new("  ", "Nameless", "2000", "N/A")).await;

        assert!(matches!(result, Err(FavoritesError::InvalidId(_))));
        assert!(store.is_empty().await);
        assert_eq!(backend.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ids_are_case_sensitive() {
        let (_, store) = memory_store().await;
        store.add(dark_knight()).await.unwrap();
        assert!(store.contains("tt0468569").await);
        assert!(!store.contains("TT0468569").await);
    }

    #[tokio::test]
    async fn test_remove() {
        let (_, store) = memory_store().await;
        store.add(dark_knight()).await.unwrap();
        store.add(ryan()).await.unwrap();

        assert!(store.remove("tt0468569").await);
        assert!(!store.contains("tt0468569").await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_absent_skips_save() {
        let (backend, store) = memory_store().await;
        store.add(dark_knight()).await.unwrap();
        let saves = backend.saves.load(Ordering::SeqCst);

        assert!(!store.remove("nonexistent").await);
        assert_eq!(store.list().await, vec![dark_knight()]);
        assert_eq!(backend.saves.load(Ordering::SeqCst), saves);
    }

    #[tokio::test]
    async fn test_every_mutation_saves_full_collection() {
        let (backend, store) = memory_store().await;
        store.add(dark_knight()).await.unwrap();
        store.add(ryan()).await.unwrap();
        store.remove("tt0468569").await;

        assert_eq!(backend.saves.load(Ordering::SeqCst), 3);
        assert_eq!(backend.saved.lock().unwrap().clone(), Some(vec![ryan()]));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_memory_state() {
        let backend = Arc::new(MemoryBackend {
            fail_saves: true,
            ..Default::default()
        });
        let store = FavoritesStore::initialize(backend.clone()).await;

        store.add(dark_knight()).await.unwrap();
        assert!(store.contains("tt0468569").await);
        assert!(store.remove("tt0468569").await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_scenario() {
        let (_, store) = memory_store().await;
        store.add(MovieRecord::new("tt1", "A", "2000", "N/A")).await.unwrap();
        assert_eq!(store.list().await, vec![MovieRecord::new("tt1", "A", "2000", "N/A")]);

        store.add(MovieRecord::new("tt1", "B", "2000", "N/A")).await.unwrap();
        assert_eq!(store.list().await, vec![MovieRecord::new("tt1", "B", "2000", "N/A")]);

        assert!(store.remove("tt1").await);
        assert!(store.list().await.is_empty());
        assert!(!store.remove("tt1").await);
    }

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(JsonFileBackend::in_dir(dir.path()));

        {
            let store = FavoritesStore::initialize(backend.clone()).await;
            store.add(dark_knight()).await.unwrap();
            store.add(ryan()).await.unwrap();
            store.add(MovieRecord::new("tt1", "A", "2000", "N/A")).await.unwrap();
            store.remove("tt1").await;
        }

        let reloaded = FavoritesStore::initialize(backend).await;
        let mut ids: Vec<String> = reloaded.list().await.into_iter().map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["tt0120815", "tt0468569"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(JsonFileBackend::in_dir(dir.path()));
        std::fs::write(backend.path(), "[{\"imdbID\": 12").unwrap();

        let store = FavoritesStore::initialize(backend.clone()).await;
        assert!(store.is_empty().await);

        // The next save heals the file.
        store.add(dark_knight()).await.unwrap();
        let reloaded = FavoritesStore::initialize(backend).await;
        assert_eq!(reloaded.list().await, vec![dark_knight()]);
    }

    #[tokio::test]
    async fn test_concurrent_adds_end_up_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(JsonFileBackend::in_dir(dir.path()));
        let store = Arc::new(FavoritesStore::initialize(backend.clone()).await);

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("tt{:07}", i);
                store.add(MovieRecord::new(&id, "Movie", "2000", "N/A")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let reloaded = FavoritesStore::initialize(backend).await;
        assert_eq!(reloaded.len().await, 16);
    }
}
