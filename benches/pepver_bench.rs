use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pepver::prelude::*;

fn canonical_inputs() -> Vec<&'static str> {
    vec![
        "1.0",
        "1.2.3",
        "1.0a1",
        "1.0rc2.dev3",
        "1!2.0.post4",
        "1.0+ubuntu.1",
    ]
}

fn alternate_inputs() -> Vec<&'static str> {
    vec![
        "v1.0",
        "  1.2.3\n",
        "1.0-Alpha_1",
        "1.0.preview-2.DEV.3",
        "01!2.0-4",
        "1.0+Ubuntu-1",
    ]
}

fn parse_ok(inputs: &[&str]) {
    for input in inputs {
        let res = Version::parse(input);
        assert!(res.is_ok());
    }
}

fn sort_versions(inputs: &[&str]) {
    let mut versions = inputs
        .iter()
        .map(|input| Version::parse(input).unwrap())
        .collect::<Vec<_>>();
    versions.sort();
}

fn bump_all(inputs: &[&str]) {
    for input in inputs {
        let version = Version::parse(input).unwrap();
        for segment in [Segment::MAJOR, Segment::Release, Segment::Post, Segment::Dev] {
            assert!(version.bump(segment).is_ok());
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse_canonical", |b| b.iter(|| parse_ok(black_box(&canonical_inputs()))));
    c.bench_function("parse_alternate", |b| b.iter(|| parse_ok(black_box(&alternate_inputs()))));
    c.bench_function("sort", |b| {
        let inputs = [canonical_inputs(), alternate_inputs()].concat();
        b.iter(|| sort_versions(black_box(&inputs)))
    });
    c.bench_function("bump", |b| b.iter(|| bump_all(black_box(&canonical_inputs()))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
