use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::types::Rule;

/// Cached resolved rule lists for one repository.
///
/// Each direction is independently either unpopulated or populated: an
/// empty populated list means "no rules configured", unpopulated means "not
/// resolved yet". Readers always observe a complete list: all mutation is
/// a wholesale `set_*` swap of a working copy, never in-place edits.
#[derive(Debug, Default)]
pub struct RulesCache {
    inbound: Mutex<Option<Vec<Rule>>>,
    outbound: Mutex<Option<Vec<Rule>>>,
    /// Serializes synchronizer read-modify-write sequences on this cache.
    update: Mutex<()>,
}

impl RulesCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cached inbound list; `None` while unpopulated.
    #[must_use]
    pub fn inbound(&self) -> Option<Vec<Rule>> {
        self.inbound.lock().expect("cache lock poisoned").clone()
    }

    /// Replace the inbound list wholesale, establishing "populated".
    pub fn set_inbound(&self, rules: Vec<Rule>) {
        *self.inbound.lock().expect("cache lock poisoned") = Some(rules);
    }

    /// Snapshot of the cached outbound list; `None` while unpopulated.
    #[must_use]
    pub fn outbound(&self) -> Option<Vec<Rule>> {
        self.outbound.lock().expect("cache lock poisoned").clone()
    }

    /// Replace the outbound list wholesale, establishing "populated".
    pub fn set_outbound(&self, rules: Vec<Rule>) {
        *self.outbound.lock().expect("cache lock poisoned") = Some(rules);
    }

    pub(crate) fn update_guard(&self) -> MutexGuard<'_, ()> {
        self.update.lock().expect("cache lock poisoned")
    }
}

/// Explicit repository-name → cache mapping.
///
/// Owned by the engine context, replacing any notion of a process-wide
/// cache singleton. Instances are created lazily on first access and live
/// for the registry's lifetime; distinct repositories never contend.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    caches: Mutex<HashMap<String, Arc<RulesCache>>>,
}

impl CacheRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache for `repository`, created on first use.
    #[must_use]
    pub fn cache(&self, repository: &str) -> Arc<RulesCache> {
        let mut caches = self.caches.lock().expect("registry lock poisoned");
        Arc::clone(caches.entry(repository.to_owned()).or_default())
    }

    /// Number of repositories holding a cache instance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.caches.lock().expect("registry lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
