use urlrewrite::{fields, ChangeEvent, EngineConfig, MemoryRepository, RewriteEngine};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let mut repo = MemoryRepository::new("master");
    let folder_id = repo.add_folder(None, "redirects", Some("main"));
    let old_page = repo.add_simple_redirect(
        folder_id,
        "old-page",
        "/old-page",
        r#"<link linktype="external" url="https://example.com/new" />"#,
    );
    let promo = repo.add_simple_redirect(
        folder_id,
        "promo",
        "/promo-2019",
        r#"<link url="/promotions" />"#,
    );

    let engine = RewriteEngine::new(EngineConfig::default());
    let rules = engine.cached_inbound_rules(&repo).expect("repository is reachable");
    println!("initially cached: {} rules", rules.len());

    // An editor repoints /old-page; only that entry changes, in place.
    let folder = repo.item(folder_id).unwrap();
    let edited = repo
        .item(old_page)
        .unwrap()
        .with_field(fields::TARGET, r#"<link url="/archive/old-page" />"#);
    engine.apply_change(&repo, &ChangeEvent::upserted(edited, folder.clone()));

    // The promo redirect is retired.
    let retired = repo.item(promo).unwrap();
    repo.remove_item(promo);
    engine.apply_change(&repo, &ChangeEvent::deleted(retired, folder));

    let rules = engine.cache("master").inbound().unwrap();
    println!("after edits: {} rules", rules.len());
    for rule in rules {
        println!("  {rule}");
    }
}
