use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{Task, TaskKind};
use crate::storage::Storage;

const DIRTY_KEY: &str = "tasks.dirty";

fn payload_key(kind: TaskKind) -> String {
    format!("tasks.{}", kind.as_str())
}

fn fetched_at_key(kind: TaskKind) -> String {
    format!("tasks.{}.fetched_at", kind.as_str())
}

/// Persisted holder of the last-known task collection per kind, with dirty
/// flags and fetch timestamps.
///
/// The cache never talks to the remote store itself; it only answers
/// whether its payload can be trusted and tracks mutations the client has
/// already confirmed remotely. Anything persisted that fails to
/// deserialize is treated as absent, never as an error.
pub struct TaskCache {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    max_age: Duration,
}

impl TaskCache {
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>, config: &ClientConfig) -> Self {
        Self {
            storage,
            clock,
            max_age: Duration::seconds(config.cache_max_age_secs as i64),
        }
    }

    /// The persisted payload, or `None` when absent or malformed.
    pub fn cached(&self, kind: TaskKind) -> Option<Vec<Task>> {
        let raw = self.storage.get(&payload_key(kind)).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(tasks) => Some(tasks),
            Err(e) => {
                warn!(kind = kind.as_str(), error = %e, "discarding malformed cached payload");
                None
            }
        }
    }

    /// Whether the last fetch is inside the expiry window. Absent or
    /// unparseable timestamps count as stale.
    pub fn is_fresh(&self, kind: TaskKind) -> bool {
        let Some(raw) = self.storage.get(&fetched_at_key(kind)).ok().flatten() else {
            return false;
        };
        match raw.parse::<DateTime<Utc>>() {
            Ok(fetched_at) => self.clock.now() - fetched_at < self.max_age,
            Err(e) => {
                warn!(kind = kind.as_str(), error = %e, "discarding malformed fetch timestamp");
                false
            }
        }
    }

    pub fn is_dirty(&self, kind: TaskKind) -> bool {
        self.dirty_map()
            .get(kind.as_str())
            .copied()
            .unwrap_or(false)
    }

    /// Persist a freshly fetched payload: stores the tasks, stamps the
    /// fetch time, clears the dirty flag.
    pub fn save_tasks(&self, kind: TaskKind, tasks: &[Task]) -> Result<()> {
        let payload = serde_json::to_string(tasks)?;
        self.storage.set(&payload_key(kind), &payload)?;
        self.storage
            .set(&fetched_at_key(kind), &self.clock.now().to_rfc3339())?;
        self.set_dirty(kind, false)?;
        Ok(())
    }

    /// Track a remotely confirmed create. With no cached payload this
    /// starts a fresh singleton payload.
    pub fn add_task(&self, task: &Task) -> Result<()> {
        let kind = task.kind();
        let mut tasks = self.cached(kind).unwrap_or_default();
        tasks.push(task.clone());
        let payload = serde_json::to_string(&tasks)?;
        self.storage.set(&payload_key(kind), &payload)
    }

    /// Track a remotely confirmed update. A no-op when no payload is
    /// cached or the task is not in it.
    pub fn update_task(&self, task: &Task) -> Result<()> {
        let kind = task.kind();
        let Some(mut tasks) = self.cached(kind) else {
            debug!(kind = kind.as_str(), id = %task.id, "no cached payload, skipping update");
            return Ok(());
        };
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task.clone(),
            None => {
                debug!(kind = kind.as_str(), id = %task.id, "task not in cached payload, skipping update");
                return Ok(());
            }
        }
        let payload = serde_json::to_string(&tasks)?;
        self.storage.set(&payload_key(kind), &payload)
    }

    /// Track a remotely confirmed delete. A no-op when no payload is
    /// cached.
    pub fn remove_task(&self, kind: TaskKind, id: &str) -> Result<()> {
        let Some(mut tasks) = self.cached(kind) else {
            debug!(kind = kind.as_str(), id, "no cached payload, skipping remove");
            return Ok(());
        };
        tasks.retain(|t| t.id != id);
        let payload = serde_json::to_string(&tasks)?;
        self.storage.set(&payload_key(kind), &payload)
    }

    pub fn mark_dirty(&self, kind: TaskKind) -> Result<()> {
        self.set_dirty(kind, true)
    }

    pub fn mark_all_dirty(&self) -> Result<()> {
        for kind in TaskKind::ALL {
            self.set_dirty(kind, true)?;
        }
        Ok(())
    }

    /// Drop the payload and its fetch timestamp, leaving dirty flags as
    /// they are.
    pub fn drop_payload(&self, kind: TaskKind) -> Result<()> {
        self.storage.remove(&payload_key(kind))?;
        self.storage.remove(&fetched_at_key(kind))
    }

    /// Full reset: payloads, timestamps and dirty flags (logout path).
    pub fn clear(&self) -> Result<()> {
        for kind in TaskKind::ALL {
            self.drop_payload(kind)?;
        }
        self.storage.remove(DIRTY_KEY)
    }

    fn dirty_map(&self) -> HashMap<String, bool> {
        let Some(raw) = self.storage.get(DIRTY_KEY).ok().flatten() else {
            return HashMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "discarding malformed dirty map");
                HashMap::new()
            }
        }
    }

    fn set_dirty(&self, kind: TaskKind, value: bool) -> Result<()> {
        let mut map = self.dirty_map();
        map.insert(kind.as_str().to_string(), value);
        let raw = serde_json::to_string(&map)?;
        self.storage.set(DIRTY_KEY, &raw)
    }
}
