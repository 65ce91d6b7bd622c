use std::sync::Arc;

use tracing::info;
use ulid::Ulid;

use crate::error::Result;
use crate::models::TaskKind;
use crate::storage::Storage;

use super::store::TaskCache;

const SESSION_ID_KEY: &str = "session.id";
const LOADED_KEY: &str = "session.loaded";

/// Distinguishes a fresh start (page reload / new tab) from in-app
/// navigation, using a session marker in tab-scoped volatile storage.
///
/// `initialize` runs once per process start: a freshly generated
/// identifier never matches the stored one, so a start is always treated
/// as a reload and the cached payloads are invalidated. Afterwards the new
/// identifier and a loaded marker are persisted; in-app code consults
/// `is_loaded` instead of re-running detection.
pub struct SessionTracker {
    volatile: Arc<dyn Storage>,
}

impl SessionTracker {
    pub fn new(volatile: Arc<dyn Storage>) -> Self {
        Self { volatile }
    }

    /// Detect a reload and invalidate `cache` accordingly. Returns whether
    /// a reload was detected.
    pub fn initialize(&self, cache: &TaskCache) -> Result<bool> {
        let fresh = Ulid::new().to_string();
        let stored = self.volatile.get(SESSION_ID_KEY)?;
        let reloaded = stored.as_deref() != Some(fresh.as_str());

        if reloaded {
            info!("session reload detected, invalidating cached tasks");
            cache.mark_all_dirty()?;
            for kind in TaskKind::ALL {
                cache.drop_payload(kind)?;
            }
        }

        self.volatile.set(SESSION_ID_KEY, &fresh)?;
        self.volatile.set(LOADED_KEY, "true")?;
        Ok(reloaded)
    }

    /// Whether this tab session has already gone through `initialize`.
    pub fn is_loaded(&self) -> bool {
        self.volatile
            .get(LOADED_KEY)
            .ok()
            .flatten()
            .is_some()
    }

    /// Forget the session marker (logout / explicit cache reset).
    pub fn reset(&self) -> Result<()> {
        self.volatile.remove(SESSION_ID_KEY)?;
        self.volatile.remove(LOADED_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};

    fn cache_with_storage() -> (TaskCache, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
        ));
        let cache = TaskCache::new(storage.clone(), clock, &ClientConfig::default());
        (cache, storage)
    }

    #[test]
    fn test_initialize_marks_every_kind_dirty() {
        let (cache, _) = cache_with_storage();
        cache.save_tasks(TaskKind::OneTime, &[]).unwrap();
        cache.save_tasks(TaskKind::Recurring, &[]).unwrap();

        let tracker = SessionTracker::new(Arc::new(MemoryStorage::new()));
        assert!(tracker.initialize(&cache).unwrap());
        assert!(cache.is_dirty(TaskKind::OneTime));
        assert!(cache.is_dirty(TaskKind::Recurring));
        assert_eq!(cache.cached(TaskKind::OneTime), None);
        assert_eq!(cache.cached(TaskKind::Recurring), None);
    }

    #[test]
    fn test_loaded_marker_set_after_initialize() {
        let (cache, _) = cache_with_storage();
        let tracker = SessionTracker::new(Arc::new(MemoryStorage::new()));
        assert!(!tracker.is_loaded());
        tracker.initialize(&cache).unwrap();
        assert!(tracker.is_loaded());
    }

    #[test]
    fn test_reset_clears_marker() {
        let (cache, _) = cache_with_storage();
        let tracker = SessionTracker::new(Arc::new(MemoryStorage::new()));
        tracker.initialize(&cache).unwrap();
        tracker.reset().unwrap();
        assert!(!tracker.is_loaded());
    }
}
