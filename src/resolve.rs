use tracing::{debug, warn};

use crate::convert;
use crate::repo::Repository;
use crate::types::{ItemKind, Rule};

/// Shapes that can contribute to the inbound list.
const INBOUND_KINDS: &[ItemKind] = &[ItemKind::SimpleRedirect, ItemKind::InboundRule];

const OUTBOUND_KINDS: &[ItemKind] = &[ItemKind::OutboundRule];

/// Resolve the full ordered inbound-rule list for a repository.
///
/// Scans every rule folder at or below `root` and converts its descendants
/// in discovery order: simple redirects unconditionally, full inbound rules
/// only when enabled. Malformed definitions are logged and skipped without
/// aborting their siblings.
///
/// Returns `None` ("not resolvable", distinct from an empty list) when the
/// store is unavailable or holds no rule folders. Callers must never cache
/// a `None`.
#[must_use]
pub fn resolve_inbound<R: Repository + ?Sized>(repo: &R, root: &str) -> Option<Vec<Rule>> {
    let folders = repo.folders_under(root)?;
    if folders.is_empty() {
        debug!(repository = %repo.name(), root, "no rule folders found");
        return None;
    }

    let mut rules = Vec::new();
    for folder in &folders {
        debug!(folder = %folder.name, "loading inbound rules");
        for item in repo.descendants(folder, INBOUND_KINDS) {
            match item.kind {
                ItemKind::SimpleRedirect => {
                    rules.push(convert::convert_simple_redirect(repo, &item, folder));
                }
                ItemKind::InboundRule => {
                    match convert::convert_inbound_rule(repo, &item, folder) {
                        Ok(rule) if rule.enabled => rules.push(rule),
                        Ok(_) => debug!(item = %item.name, "skipping disabled rule"),
                        Err(err) => {
                            warn!(item = %item.name, %err, "skipping malformed rule");
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Some(rules)
}

/// Resolve the full ordered outbound-rule list for a repository.
///
/// Structurally [`resolve_inbound`] restricted to outbound definitions,
/// with the same enabled filter and the same `None` semantics.
#[must_use]
pub fn resolve_outbound<R: Repository + ?Sized>(repo: &R, root: &str) -> Option<Vec<Rule>> {
    let folders = repo.folders_under(root)?;
    if folders.is_empty() {
        debug!(repository = %repo.name(), root, "no rule folders found");
        return None;
    }

    let mut rules = Vec::new();
    for folder in &folders {
        debug!(folder = %folder.name, "loading outbound rules");
        for item in repo.descendants(folder, OUTBOUND_KINDS) {
            match convert::convert_outbound_rule(&item, folder) {
                Ok(rule) if rule.enabled => rules.push(rule),
                Ok(_) => debug!(item = %item.name, "skipping disabled rule"),
                Err(err) => warn!(item = %item.name, %err, "skipping malformed rule"),
            }
        }
    }

    Some(rules)
}
