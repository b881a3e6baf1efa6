//! Benchmarks for the DNS codec.
//!
//! Measures query parsing and response construction on realistic packets.

use criterion::{BenchmarkId, Criterion, Throughput, black_box};
use rand::Rng;

use adtrap::dns::{self, DnsQuery, TYPE_A, TYPE_AAAA};

fn build_query(id: u16, domain: &str, qtype: u16) -> Vec<u8> {
    let mut query = Vec::new();
    query.extend_from_slice(&id.to_be_bytes());
    query.extend_from_slice(&[0x01, 0x00]); // standard query
    query.extend_from_slice(&[0x00, 0x01]); // QDCOUNT
    query.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in domain.split('.') {
        query.push(label.len() as u8);
        query.extend_from_slice(label.as_bytes());
    }
    query.push(0);
    query.extend_from_slice(&qtype.to_be_bytes());
    query.extend_from_slice(&[0x00, 0x01]); // IN
    query
}

fn bench_codec(c: &mut Criterion) {
    let mut rng = rand::rng();
    let short = build_query(rng.random(), "example.com", TYPE_A);
    let long = build_query(
        rng.random(),
        "metrics.eu-west-1.telemetry.cdn.example-provider.com",
        TYPE_AAAA,
    );

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(1));

    group.bench_function(BenchmarkId::new("parse", "short_name"), |b| {
        b.iter(|| DnsQuery::parse(black_box(&short)))
    });

    group.bench_function(BenchmarkId::new("parse", "long_name"), |b| {
        b.iter(|| DnsQuery::parse(black_box(&long)))
    });

    group.bench_function(BenchmarkId::new("build_response", "blocked_a"), |b| {
        b.iter(|| dns::build_response(black_box(&short), "example.com", true))
    });

    group.bench_function(BenchmarkId::new("build_response", "allowed"), |b| {
        b.iter(|| dns::build_response(black_box(&short), "example.com", false))
    });

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    bench_codec(&mut criterion);
    criterion.final_summary();
}
