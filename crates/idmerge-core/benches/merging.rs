use criterion::{Criterion, criterion_group, criterion_main};
use idmerge_core::merge::{Merger, UnionStrategy};
use idmerge_core::model::Account;
use std::hint::black_box;

/// Accounts in groups of `group` that each share one key with the previous
/// account, so every group collapses into one person through a chain.
fn build_accounts(count: usize, group: usize) -> Vec<Account> {
    (0..count)
        .map(|i| {
            let g = i / group;
            let emails = vec![
                format!("user{}@example.com", i),
                format!("group{}-{}@example.com", g, i % group),
                format!("group{}-{}@example.com", g, (i % group) + 1),
            ];
            Account::new(format!("app{}", i % 7), emails, format!("User {}", i))
        })
        .collect()
}

fn bench_merge_raw_length(c: &mut Criterion) {
    let accounts = build_accounts(10_000, 25);
    let merger = Merger::new(UnionStrategy::RawLength);

    c.bench_function("merge_10k_accounts_raw_length", |b| {
        b.iter(|| merger.merge(black_box(&accounts)))
    });
}

fn bench_merge_cluster_size(c: &mut Criterion) {
    let accounts = build_accounts(10_000, 25);
    let merger = Merger::new(UnionStrategy::ClusterSize);

    c.bench_function("merge_10k_accounts_cluster_size", |b| {
        b.iter(|| merger.merge(black_box(&accounts)))
    });
}

fn bench_parse_accounts(c: &mut Criterion) {
    let accounts = build_accounts(10_000, 25);
    let json = serde_json::to_string(&accounts).unwrap();

    c.bench_function("parse_10k_accounts", |b| {
        b.iter(|| idmerge_core::storage::parse_accounts(black_box(&json)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_merge_raw_length,
    bench_merge_cluster_size,
    bench_parse_accounts
);
criterion_main!(benches);
