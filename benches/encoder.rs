#[macro_use]
extern crate criterion;

use bytes::Bytes;
use criterion::{black_box, Criterion};

use mpack::prelude::*;

pub fn u64_to_bytes_le(x: u64) -> Bytes { Bytes::from(u64::to_le_bytes(x).to_vec()) }

const N_BIG_ARR: usize = 2000;

fn big_arr() -> Value {
    let v: Vec<Value> = (0..N_BIG_ARR).map(|i| Value::from(i as i64)).collect();
    Value::from(v)
}

const N_ARR: usize = 10;
const N_MAP: usize = 10;

fn big_v() -> Value {
    let v0: Vec<Value> = (0..N_ARR).map(|i| Value::from(i as i64)).collect();
    let m: VecMap<Value, Value> = (0..N_MAP)
        .map(|i| (Value::from(u64_to_bytes_le(i as u64)), Value::from(v0.clone())))
        .collect();
    let v: Vec<Value> = std::iter::repeat(m).map(Value::from).take(N_ARR).collect();
    Value::from(v)
}

fn enc_len(v: &Value) -> usize { encode_full(v).map(|enc| enc.len()).unwrap_or(0) }

fn bench_construction(c: &mut Criterion) {
    c.bench_function(
        &format!("Creating a Value of encoded size {}", enc_len(&big_v())),
        |b| b.iter(|| black_box(big_v())),
    );
}

fn bench_enc(c: &mut Criterion) {
    let big_v = big_v();
    c.bench_function(
        &format!("Encoding a Value, output size of {} bytes", enc_len(&big_v)),
        move |b| b.iter(|| encode_full(black_box(&big_v))),
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let big_v = big_v();
    let len = enc_len(&big_v);
    c.bench_function(
        &format!(
            "Encoding a Value, output size of {} bytes, buffer preallocated",
            len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(len * 2);
                encode(black_box(&big_v), &mut out)
            })
        },
    );
}

fn bench_dump_small_buffer(c: &mut Criterion) {
    let big_v = big_v();
    let opts = Options::default().with_initial_buffer_size(16);
    c.bench_function(
        &format!("Dumping a Value, output size of {} bytes", enc_len(&big_v)),
        move |b| b.iter(|| dump(black_box(&big_v), &opts)),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_arr = big_arr();
    c.bench_function(
        &format!("Encoding a Value vector, output size of {} bytes", enc_len(&big_arr)),
        move |b| b.iter(|| encode_full(black_box(&big_arr))),
    );
}

fn bench_enc_typed(c: &mut Criterion) {
    let typed: Vec<(u64, String)> = (0..N_BIG_ARR as u64).map(|i| (i, i.to_string())).collect();
    c.bench_function("Encoding a typed vector of pairs", move |b| {
        b.iter(|| encode_full(black_box(&typed)))
    });
}

fn bench_enc_stream(c: &mut Criterion) {
    c.bench_function("Encoding a length-less array", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            encode_stream(&mut out, (0..N_BIG_ARR as u32).map(black_box))
        })
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_enc,
    bench_enc_single_alloc,
    bench_dump_small_buffer,
    bench_enc_flat,
    bench_enc_typed,
    bench_enc_stream
);
criterion_main!(benches);
