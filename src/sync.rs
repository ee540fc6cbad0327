use tracing::{debug, warn};

use crate::cache::RulesCache;
use crate::convert;
use crate::repo::Repository;
use crate::resolve;
use crate::types::{Item, ItemId, ItemKind, Rule};

/// How a repository item changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Upserted,
    Deleted,
}

/// A single content-item change notification.
///
/// Carries the changed item together with its enclosing rule folder; the
/// folder supplies the site restriction when the item is re-converted.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub item: Item,
    pub folder: Item,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    #[must_use]
    pub fn upserted(item: Item, folder: Item) -> Self {
        Self {
            item,
            folder,
            kind: ChangeKind::Upserted,
        }
    }

    #[must_use]
    pub fn deleted(item: Item, folder: Item) -> Self {
        Self {
            item,
            folder,
            kind: ChangeKind::Deleted,
        }
    }
}

/// Apply one change notification against a repository's cached inbound
/// list.
///
/// An unpopulated cache is lazily filled from a full resolve first; if even
/// that yields nothing the update is dropped without touching the cache.
/// Mutation happens on a working copy that is swapped in with a single
/// `set_inbound`, under the cache's update guard so concurrent
/// notifications for the same repository cannot lose edits.
///
/// Only inbound shapes have an incremental path; outbound rules refresh via
/// full resolve alone.
pub(crate) fn apply<R: Repository + ?Sized>(
    repo: &R,
    root: &str,
    cache: &RulesCache,
    event: &ChangeEvent,
) {
    let _guard = cache.update_guard();

    let Some(mut rules) = cache
        .inbound()
        .or_else(|| resolve::resolve_inbound(repo, root))
    else {
        debug!(item = %event.item.name, "inbound rules unresolvable, change dropped");
        return;
    };

    match (event.kind, event.item.kind) {
        (ChangeKind::Deleted, _) => remove(&mut rules, event.item.id),
        (ChangeKind::Upserted, ItemKind::SimpleRedirect) => {
            let rule = convert::convert_simple_redirect(repo, &event.item, &event.folder);
            upsert(&mut rules, rule);
        }
        (ChangeKind::Upserted, ItemKind::InboundRule) => {
            match convert::convert_inbound_rule(repo, &event.item, &event.folder) {
                Ok(rule) => upsert(&mut rules, rule),
                Err(err) => {
                    // A definition that stopped converting must not linger
                    // in the cache as its last good version.
                    warn!(item = %event.item.name, %err, "malformed definition, removing");
                    remove(&mut rules, event.item.id);
                }
            }
        }
        (ChangeKind::Upserted, kind) => {
            debug!(item = %event.item.name, ?kind, "no incremental path for this shape");
            return;
        }
    }

    debug!(count = rules.len(), "updating rules cache");
    cache.set_inbound(rules);
}

/// Replace in place when the identity is already listed (preserving its
/// position), append otherwise. A disabled candidate removes instead.
fn upsert(rules: &mut Vec<Rule>, rule: Rule) {
    if !rule.enabled {
        remove(rules, rule.id);
        return;
    }
    match rules.iter().position(|existing| existing.id == rule.id) {
        Some(index) => rules[index] = rule,
        None => rules.push(rule),
    }
}

/// Remove by identity; absence is a no-op, not an error.
fn remove(rules: &mut Vec<Rule>, id: ItemId) {
    rules.retain(|rule| rule.id != id);
}
