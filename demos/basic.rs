use urlrewrite::{EngineConfig, MemoryRepository, RewriteEngine};

fn main() {
    // A small content tree: one rule folder scoped to the "main" site.
    let mut repo = MemoryRepository::new("master");
    let folder = repo.add_folder(None, "redirects", Some("main"));
    repo.add_simple_redirect(
        folder,
        "old-page",
        "/old-page",
        r#"<link linktype="external" url="https://example.com/new" />"#,
    );
    repo.add_simple_redirect(folder, "promo", "/promo-2019", r#"<link url="/promotions" />"#);

    let engine = RewriteEngine::new(EngineConfig::default());

    match engine.cached_inbound_rules(&repo) {
        Some(rules) => {
            println!("{} inbound rules:", rules.len());
            for rule in rules {
                println!("  {rule}");
            }
        }
        None => println!("rules unavailable"),
    }
}
