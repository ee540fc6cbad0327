use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{CacheRegistry, RulesCache};
use crate::repo::Repository;
use crate::resolve;
use crate::sync::{self, ChangeEvent};
use crate::types::Rule;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Repository path below which rule folders are discovered.
    pub search_root: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_root: "/".to_owned(),
        }
    }
}

/// Resolution and cache-synchronization context.
///
/// One engine serves any number of repositories; each gets its own lazily
/// created [`RulesCache`] keyed by [`Repository::name`]. The engine is
/// synchronous and shares safely behind an `Arc`: readers snapshot complete
/// lists, and incremental updates for the same repository are serialized on
/// that repository's cache.
#[derive(Debug, Default)]
pub struct RewriteEngine {
    config: EngineConfig,
    caches: CacheRegistry,
}

impl RewriteEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            caches: CacheRegistry::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full inbound resolve against the configured search root, without
    /// touching the cache. See [`resolve_inbound`](crate::resolve_inbound)
    /// for the `None` semantics.
    #[must_use]
    pub fn inbound_rules<R: Repository + ?Sized>(&self, repo: &R) -> Option<Vec<Rule>> {
        resolve::resolve_inbound(repo, &self.config.search_root)
    }

    /// Full outbound resolve, without touching the cache.
    #[must_use]
    pub fn outbound_rules<R: Repository + ?Sized>(&self, repo: &R) -> Option<Vec<Rule>> {
        resolve::resolve_outbound(repo, &self.config.search_root)
    }

    /// Cached inbound list, resolving and populating the cache on a miss.
    ///
    /// A failed resolve is returned as `None` and never cached, so the next
    /// read tries again.
    #[must_use]
    pub fn cached_inbound_rules<R: Repository + ?Sized>(&self, repo: &R) -> Option<Vec<Rule>> {
        let cache = self.caches.cache(repo.name());
        if let Some(rules) = cache.inbound() {
            return Some(rules);
        }
        let rules = self.inbound_rules(repo)?;
        info!(repository = %repo.name(), count = rules.len(), "caching inbound rules");
        cache.set_inbound(rules.clone());
        Some(rules)
    }

    /// Cached outbound list, resolving and populating the cache on a miss.
    #[must_use]
    pub fn cached_outbound_rules<R: Repository + ?Sized>(&self, repo: &R) -> Option<Vec<Rule>> {
        let cache = self.caches.cache(repo.name());
        if let Some(rules) = cache.outbound() {
            return Some(rules);
        }
        let rules = self.outbound_rules(repo)?;
        info!(repository = %repo.name(), count = rules.len(), "caching outbound rules");
        cache.set_outbound(rules.clone());
        Some(rules)
    }

    /// The cache instance for a repository, for read-only consumers such as
    /// the request-matching executor.
    #[must_use]
    pub fn cache(&self, repository: &str) -> Arc<RulesCache> {
        self.caches.cache(repository)
    }

    /// Apply one change notification incrementally against the repository's
    /// cached inbound list. Outbound-shaped items are ignored here; they
    /// only refresh through a full resolve.
    pub fn apply_change<R: Repository + ?Sized>(&self, repo: &R, event: &ChangeEvent) {
        debug!(
            repository = %repo.name(),
            item = %event.item.name,
            kind = ?event.kind,
            "applying change notification"
        );
        let cache = self.caches.cache(repo.name());
        sync::apply(repo, &self.config.search_root, &cache, event);
    }
}
