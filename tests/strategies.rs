use proptest::prelude::*;
use urlrewrite::{fields, Item, ItemId, ItemKind, MemoryRepository};

/// Distinct lower-case path segments, 1..=8 of them.
pub fn arb_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,8}", 1..=8).prop_map(|set| set.into_iter().collect())
}

/// Target raw values a simple redirect can carry: blank, an external URL,
/// or an internal reference that may or may not resolve.
pub fn arb_target() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,8}".prop_map(|s| {
            format!(r#"<link linktype="external" url="https://example.com/{s}" />"#)
        }),
        any::<u128>().prop_map(|n| {
            format!(r#"<link linktype="internal" id="{}" />"#, ItemId::from_u128(n))
        }),
    ]
}

/// One rule folder (site `main`) populated with a simple redirect per
/// segment, in segment order.
pub fn redirect_fixture(segments: &[String]) -> (MemoryRepository, ItemId) {
    let mut repo = MemoryRepository::new("master");
    let folder = repo.add_folder(None, "redirects", Some("main"));
    for segment in segments {
        repo.add_simple_redirect(folder, segment, &format!("/{segment}"), "");
    }
    (repo, folder)
}

/// A full inbound-rule item with the given enabled state.
pub fn inbound_item(name: &str, enabled: bool) -> Item {
    Item::new(ItemId::new(), ItemKind::InboundRule, name)
        .with_field(fields::ENABLED, if enabled { "1" } else { "0" })
        .with_field(fields::PATTERN, format!("^/{name}$"))
        .with_field(fields::TARGET, r#"<link url="/elsewhere" />"#)
}
