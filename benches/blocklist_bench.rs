//! Benchmarks for blocklist domain lookup.
//!
//! Measures how quickly we can check if a domain is blocked.

use criterion::{BenchmarkId, Criterion, Throughput, black_box};

use adtrap::filter::Blocklist;

fn bench_is_blocked(c: &mut Criterion) {
    let mut blocklist = Blocklist::from_defaults();
    blocklist.insert("*.example.com");

    let mut group = c.benchmark_group("blocklist");

    // Benchmark exact match (blocked domain)
    group.throughput(Throughput::Elements(1));
    group.bench_function(BenchmarkId::new("is_blocked", "exact_match"), |b| {
        b.iter(|| blocklist.is_blocked(black_box("ad.doubleclick.net")))
    });

    // Benchmark wildcard match (blocked via suffix)
    group.bench_function(BenchmarkId::new("is_blocked", "wildcard_match"), |b| {
        b.iter(|| blocklist.is_blocked(black_box("ads.tracking.example.com")))
    });

    // Benchmark miss (not blocked)
    group.bench_function(BenchmarkId::new("is_blocked", "miss"), |b| {
        b.iter(|| blocklist.is_blocked(black_box("www.google.com")))
    });

    // Benchmark deep subdomain miss
    group.bench_function(BenchmarkId::new("is_blocked", "deep_miss"), |b| {
        b.iter(|| blocklist.is_blocked(black_box("a.b.c.d.e.f.example.org")))
    });

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    bench_is_blocked(&mut criterion);
    criterion.final_summary();
}
