use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use tenantscope_auth::{ExecutionContext, context};
use tenantscope_infra::{FieldFilter, InMemoryStore, ScopedRepository};
use tenantscope_pantry::Recipe;

const TENANTS: usize = 10;

fn seeded(records: usize) -> ScopedRepository<Recipe, InMemoryStore<Recipe>> {
    let store = InMemoryStore::with_records(
        (0..records).map(|n| Recipe::new(format!("dish-{n}"), 1).owned_by(format!("user-{}", n % TENANTS))),
    );
    ScopedRepository::new(store)
}

fn scoped_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoped_get_all");

    for size in [1_000usize, 10_000] {
        let repo = seeded(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("owner", size), &size, |b, _| {
            context::sync_scope(ExecutionContext::for_identity("user-3"), || {
                b.iter(|| black_box(repo.get_all(&[]).unwrap()))
            })
        });

        group.bench_with_input(BenchmarkId::new("bypass", size), &size, |b, _| {
            context::sync_scope(ExecutionContext::default().bypassed(), || {
                b.iter(|| black_box(repo.get_all(&[]).unwrap()))
            })
        });

        group.bench_with_input(BenchmarkId::new("owner_with_field_filter", size), &size, |b, _| {
            let filters = [FieldFilter::equals("title", "dish-3")];
            context::sync_scope(ExecutionContext::for_identity("user-3"), || {
                b.iter(|| black_box(repo.count(&filters).unwrap()))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, scoped_reads);
criterion_main!(benches);
