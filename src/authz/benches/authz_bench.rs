//! Authorization engine benchmarks
//!
//! `is_authorized` cost grows with action depth; `get_permissions` with the
//! number of declared capabilities.

use clubhouse_authz::{role::names, AuthorizationService, AuthorizerRegistry, PolicyTable, RoleHierarchy};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_is_authorized(c: &mut Criterion) {
    let registry = AuthorizerRegistry::global();
    let service = AuthorizationService::new(names::SECRETARY, registry);

    let mut group = c.benchmark_group("is_authorized");
    for action in [
        "user.get",
        "semester.rankings.export",
        "event.participant.signin",
        "nonexistent.create",
        "event..create",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(action), action, |b, action| {
            b.iter(|| service.is_authorized(black_box(action)))
        });
    }
    group.finish();
}

fn bench_get_permissions(c: &mut Criterion) {
    let registry = AuthorizerRegistry::global();

    c.bench_function("get_permissions/webmaster", |b| {
        let service = AuthorizationService::new(names::WEBMASTER, registry);
        b.iter(|| black_box(service.get_permissions()))
    });
}

fn bench_registry_build(c: &mut Criterion) {
    let table = PolicyTable::club_default();

    c.bench_function("registry_build/club_default", |b| {
        b.iter(|| AuthorizerRegistry::build(RoleHierarchy::club(), black_box(&table)))
    });
}

criterion_group!(benches, bench_is_authorized, bench_get_permissions, bench_registry_build);
criterion_main!(benches);
