use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urlrewrite::{ChangeEvent, EngineConfig, ItemId, MemoryRepository, RewriteEngine};

/// Build a repository with one rule folder and `n` simple redirects.
fn build_repo(n: usize) -> (MemoryRepository, ItemId) {
    let mut repo = MemoryRepository::new("master");
    let folder = repo.add_folder(None, "redirects", Some("main"));
    for i in 0..n {
        repo.add_simple_redirect(
            folder,
            &format!("r{i}"),
            &format!("/old/{i}"),
            r#"<link linktype="external" url="https://example.com/new" />"#,
        );
    }
    (repo, folder)
}

fn bench_full_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_resolve");

    for &n in &[10, 100, 1000] {
        let (repo, _) = build_repo(n);
        let engine = RewriteEngine::new(EngineConfig::default());
        group.bench_function(&format!("{n}_redirects"), |b| {
            b.iter(|| engine.inbound_rules(black_box(&repo)));
        });
    }

    group.finish();
}

fn bench_incremental_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_upsert");

    for &n in &[10, 100, 1000] {
        let (repo, folder_id) = build_repo(n);
        let engine = RewriteEngine::new(EngineConfig::default());
        let rules = engine.cached_inbound_rules(&repo).unwrap();
        let folder = repo.item(folder_id).unwrap();
        let event = ChangeEvent::upserted(repo.item(rules[n / 2].id).unwrap(), folder);

        group.bench_function(&format!("{n}_cached"), |b| {
            b.iter(|| engine.apply_change(black_box(&repo), black_box(&event)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_resolve, bench_incremental_upsert);
criterion_main!(benches);
