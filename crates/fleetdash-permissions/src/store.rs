//! The live operator permission store.
//!
//! Holds the one effective [`PermissionConfig`] of a UI session and mirrors
//! it into durable storage. Without a backend (pre-rendering) every
//! persistence step is skipped and the store behaves as a plain in-memory
//! record.
//!
//! Mutations are serialized: the in-memory assignment, the durable write and
//! the observer notification of one change all finish before the next change
//! starts. Observers may read the store but must not mutate it.

use crate::bus::{PermissionEvent, PermissionObserver};
use crate::permissions::{PermissionConfig, PermissionPatch};
use fleetdash_core::{
    log_error, CoreError, CoreResult, DurableStorage, StorageConfig, DEFAULT_PERMISSIONS_KEY,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Result of reading the persisted entry.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(PermissionConfig),
    /// No backend, or no entry under the key.
    Absent,
    /// The backend failed or the entry did not decode.
    Failed(CoreError),
}

/// Returned by [`PermissionStore::subscribe`], pass to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn PermissionObserver>)>,
}

pub struct PermissionStore {
    current: Mutex<PermissionConfig>,
    mutation: Mutex<()>,
    backend: Option<Arc<dyn DurableStorage>>,
    key: String,
    observers: Mutex<Observers>,
}

impl PermissionStore {
    pub fn new(backend: Option<Arc<dyn DurableStorage>>) -> Self {
        Self::with_key(backend, DEFAULT_PERMISSIONS_KEY)
    }

    pub fn with_key(backend: Option<Arc<dyn DurableStorage>>, key: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(PermissionConfig::default()),
            mutation: Mutex::new(()),
            backend,
            key: key.into(),
            observers: Mutex::new(Observers::default()),
        }
    }

    /// Opens the configured backend. The store starts at defaults; call
    /// [`hydrate`](Self::hydrate) to pick up the persisted record.
    pub fn from_config(cfg: &StorageConfig) -> CoreResult<Self> {
        let backend = cfg.open()?;
        Ok(Self::with_key(backend, cfg.permissions_key.clone()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn subscribe(&self, observer: Arc<dyn PermissionObserver>) -> SubscriptionId {
        let mut observers = self.lock_observers();
        let id = SubscriptionId(observers.next_id);
        observers.next_id += 1;
        observers.entries.push((id, observer));
        id
    }

    /// Returns `false` if `id` was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.entries.len();
        observers.entries.retain(|(entry, _)| *entry != id);
        observers.entries.len() != before
    }

    pub fn snapshot(&self) -> PermissionConfig {
        *self.lock_current()
    }

    /// Reads and decodes the persisted entry without touching memory.
    pub fn load_persisted(&self) -> LoadOutcome {
        let Some(backend) = &self.backend else {
            trace!(key = %self.key, "no durable storage, skipping load");
            return LoadOutcome::Absent;
        };
        let raw = match backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Absent,
            Err(err) => return LoadOutcome::Failed(err),
        };
        match serde_json::from_str::<PermissionConfig>(&raw) {
            Ok(cfg) => LoadOutcome::Loaded(cfg),
            Err(err) => LoadOutcome::Failed(err.into()),
        }
    }

    /// Replaces the in-memory record with the persisted one, if any.
    ///
    /// Never writes back: a malformed entry stays as it is and the current
    /// record is kept.
    pub fn hydrate(&self) -> LoadOutcome {
        let _mutation = self.lock_mutation();
        let outcome = self.load_persisted();
        match &outcome {
            LoadOutcome::Loaded(cfg) => {
                *self.lock_current() = *cfg;
                debug!(key = %self.key, "operator permissions hydrated");
                self.notify(&PermissionEvent::Hydrated(*cfg));
            }
            LoadOutcome::Absent => {
                debug!(key = %self.key, "no stored operator permissions, keeping defaults");
            }
            LoadOutcome::Failed(err) => log_error("load operator permissions", err),
        }
        outcome
    }

    /// Merges `patch` over the current record and persists the result.
    pub fn update(&self, patch: &PermissionPatch) -> PermissionConfig {
        let _mutation = self.lock_mutation();
        let next = {
            let mut current = self.lock_current();
            let merged = current.merged(patch);
            *current = merged;
            merged
        };
        self.persist(&next);
        self.notify(&PermissionEvent::Updated(next));
        next
    }

    pub fn reset(&self) -> PermissionConfig {
        let _mutation = self.lock_mutation();
        let defaults = PermissionConfig::default();
        *self.lock_current() = defaults;
        self.persist(&defaults);
        self.notify(&PermissionEvent::Reset(defaults));
        defaults
    }

    fn persist(&self, cfg: &PermissionConfig) {
        let Some(backend) = &self.backend else {
            trace!(key = %self.key, "no durable storage, skipping persist");
            return;
        };
        let result = serde_json::to_string(cfg)
            .map_err(CoreError::from)
            .and_then(|raw| backend.set_item(&self.key, &raw));
        match result {
            Ok(()) => debug!(key = %self.key, "operator permissions persisted"),
            Err(err) => log_error("persist operator permissions", &err),
        }
    }

    fn notify(&self, event: &PermissionEvent) {
        let observers: Vec<_> = self
            .lock_observers()
            .entries
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer.on_event(event);
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, PermissionConfig> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_mutation(&self) -> MutexGuard<'_, ()> {
        self.mutation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Observers> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
