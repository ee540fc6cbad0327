mod strategies;

use proptest::prelude::*;
use strategies::{arb_segments, arb_target, inbound_item, redirect_fixture};
use urlrewrite::{
    convert_simple_redirect, fields, ChangeEvent, EngineConfig, Item, ItemId, ItemKind,
    MemoryRepository, RedirectTarget, Repository, RewriteEngine, Rule, RuleAction,
};

fn engine() -> RewriteEngine {
    RewriteEngine::new(EngineConfig::default())
}

fn ids(rules: &[Rule]) -> Vec<ItemId> {
    rules.iter().map(|rule| rule.id).collect()
}

// ---------------------------------------------------------------------------
// Invariant 1: Conversion determinism
//
// Converting the same definition against the same folder twice must produce
// rules equal in every field.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn conversion_deterministic(
        segment in "[a-z]{1,8}",
        target in arb_target(),
        site in prop::option::of("[a-z]{1,6}"),
    ) {
        let repo = MemoryRepository::new("master");
        let mut folder = Item::new(ItemId::from_u128(100), ItemKind::RedirectFolder, "redirects");
        if let Some(site) = &site {
            folder = folder.with_field(fields::SITE, site.as_str());
        }
        let item = Item::new(ItemId::from_u128(1), ItemKind::SimpleRedirect, segment.as_str())
            .with_field(fields::PATH, format!("/{segment}"))
            .with_field(fields::TARGET, target.as_str());

        let first = convert_simple_redirect(&repo, &item, &folder);
        let second = convert_simple_redirect(&repo, &item, &folder);
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Target exclusivity
//
// A converted redirect carries an item reference only when the target item
// actually exists; otherwise the literal URL (possibly empty). Never both.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn target_exclusive(internal in any::<bool>(), anchor in prop::option::of("[a-z]{1,5}")) {
        let mut repo = MemoryRepository::new("master");
        let folder_id = repo.add_folder(None, "redirects", None);
        let landing = repo.add_content(Some(folder_id), "landing");

        let raw = if internal {
            match &anchor {
                Some(anchor) => {
                    format!(r#"<link linktype="internal" id="{landing}" anchor="{anchor}" />"#)
                }
                None => format!(r#"<link linktype="internal" id="{landing}" />"#),
            }
        } else {
            r#"<link linktype="external" url="https://example.com/x" />"#.to_owned()
        };
        let item = Item::new(ItemId::from_u128(1), ItemKind::SimpleRedirect, "r")
            .with_field(fields::PATH, "/r")
            .with_field(fields::TARGET, raw);
        let folder = repo.item(folder_id).unwrap();

        let rule = convert_simple_redirect(&repo, &item, &folder);
        match rule.action {
            RuleAction::Redirect(redirect) => match redirect.target {
                RedirectTarget::Item { id, anchor: got } => {
                    prop_assert!(internal);
                    prop_assert!(repo.exists(id));
                    prop_assert_eq!(got, anchor);
                }
                RedirectTarget::Url(url) => {
                    prop_assert!(!internal);
                    prop_assert!(!url.is_empty());
                }
            },
            other => prop_assert!(false, "expected Redirect, got {:?}", other),
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Order preservation under replace
//
// Re-upserting an existing identity leaves every rule at its index; only the
// replaced entry changes content.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn replace_preserves_order(segments in arb_segments(), index in any::<prop::sample::Index>()) {
        let (repo, folder_id) = redirect_fixture(&segments);
        let engine = engine();
        let before = engine.cached_inbound_rules(&repo).unwrap();
        let k = index.index(before.len());
        let folder = repo.item(folder_id).unwrap();

        let edited = repo.item(before[k].id).unwrap().with_field(fields::PATH, "/edited");
        engine.apply_change(&repo, &ChangeEvent::upserted(edited, folder));

        let after = engine.cache("master").inbound().unwrap();
        prop_assert_eq!(ids(&before), ids(&after));
        prop_assert_eq!(after[k].pattern.as_str(), "^/edited/?$");
    }

    #[test]
    fn append_for_new(segments in arb_segments()) {
        let (mut repo, folder_id) = redirect_fixture(&segments);
        let engine = engine();
        let before = engine.cached_inbound_rules(&repo).unwrap();

        let fresh = repo.add_simple_redirect(folder_id, "fresh", "/fresh", "");
        let folder = repo.item(folder_id).unwrap();
        engine.apply_change(
            &repo,
            &ChangeEvent::upserted(repo.item(fresh).unwrap(), folder),
        );

        let after = engine.cache("master").inbound().unwrap();
        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(after.last().unwrap().id, fresh);
        prop_assert_eq!(ids(&before), ids(&after[..before.len()]));
    }

    #[test]
    fn delete_absent_is_noop(segments in arb_segments(), ghost in any::<u128>()) {
        let (repo, folder_id) = redirect_fixture(&segments);
        let engine = engine();
        let before = engine.cached_inbound_rules(&repo).unwrap();
        let folder = repo.item(folder_id).unwrap();

        let ghost_item = Item::new(ItemId::from_u128(ghost), ItemKind::SimpleRedirect, "ghost")
            .with_field(fields::PATH, "/ghost");
        engine.apply_change(&repo, &ChangeEvent::deleted(ghost_item, folder));

        prop_assert_eq!(engine.cache("master").inbound().unwrap(), before);
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Disable equals delete
//
// An upsert whose converted rule is disabled must leave the cache exactly as
// a delete notification for the same identity would.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn disable_equals_delete(segments in arb_segments()) {
        let (mut repo, folder_id) = redirect_fixture(&segments);
        let full_id = repo.add_item(Some(folder_id), inbound_item("full", true));
        let folder = repo.item(folder_id).unwrap();

        let disable_engine = engine();
        let delete_engine = engine();
        prop_assert!(disable_engine.cached_inbound_rules(&repo).is_some());
        prop_assert!(delete_engine.cached_inbound_rules(&repo).is_some());

        let disabled = repo.item(full_id).unwrap().with_field(fields::ENABLED, "0");
        disable_engine.apply_change(&repo, &ChangeEvent::upserted(disabled, folder.clone()));
        delete_engine.apply_change(
            &repo,
            &ChangeEvent::deleted(repo.item(full_id).unwrap(), folder),
        );

        let disabled_view = disable_engine.cache("master").inbound().unwrap();
        let deleted_view = delete_engine.cache("master").inbound().unwrap();
        prop_assert_eq!(&disabled_view, &deleted_view);
        prop_assert!(disabled_view.iter().all(|rule| rule.id != full_id));
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Lazy population
//
// An incremental update against an unpopulated cache first loads the full
// list; re-upserting an unchanged definition must therefore land exactly on
// the full-resolve result.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn lazy_population_matches_full_resolve(
        segments in arb_segments(),
        index in any::<prop::sample::Index>(),
    ) {
        let (repo, folder_id) = redirect_fixture(&segments);
        let engine = engine();
        let resolved = engine.inbound_rules(&repo).unwrap();
        let k = index.index(resolved.len());
        let folder = repo.item(folder_id).unwrap();

        engine.apply_change(
            &repo,
            &ChangeEvent::upserted(repo.item(resolved[k].id).unwrap(), folder),
        );

        prop_assert_eq!(engine.cache("master").inbound().unwrap(), resolved);
    }
}
