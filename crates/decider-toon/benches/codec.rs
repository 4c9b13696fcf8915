use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use decider_toon::{decode, encode, Indent, Map, Value};

/// A check report with `n` scope matches, the typical shape decider emits.
fn report(n: usize) -> Value {
    let matches = (0..n)
        .map(|i| {
            let mut entry = Map::new();
            entry.insert("adr_id".into(), Value::from(format!("ADR-{i:04}")));
            entry.insert("file".into(), Value::from(format!("src/module_{i}/file.go")));
            entry.insert("pattern".into(), Value::from("src/**/*.go"));
            entry.insert("weight".into(), Value::Float(i as f64 / 7.0));
            Value::Map(entry)
        })
        .collect();
    let mut root = Map::new();
    root.insert("passed".into(), Value::Bool(true));
    root.insert("matches".into(), Value::Sequence(matches));
    Value::Map(root)
}

fn bench_codec(c: &mut Criterion) {
    let value = report(500);
    let compact = encode(&value, None).unwrap();
    let indent = Indent::default();

    c.bench_function("encode_compact_500", |b| {
        b.iter(|| encode(black_box(&value), None).unwrap())
    });
    c.bench_function("encode_indented_500", |b| {
        b.iter(|| encode(black_box(&value), Some(&indent)).unwrap())
    });
    c.bench_function("decode_500", |b| b.iter(|| decode(black_box(&compact)).unwrap()));
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
