#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use parjson::{Parjson, User};
use std::hint::black_box;

const CHILD_COUNT: usize = 10_000;

fn pool_sizes() -> Vec<usize> {
    let max = parjson::api::available_parallelism();
    if max > 1 { vec![1, max] } else { vec![1] }
}

fn bench_encode(c: &mut Criterion) {
    let user = User::sample(CHILD_COUNT);
    let text_len = Parjson::encode(&user).expect("encode failed").len();

    let mut group = c.benchmark_group("Encode");
    group.throughput(Throughput::Bytes(text_len as u64));

    for workers in pool_sizes() {
        let encoder = Parjson::builder()
            .workers(workers)
            .encoder()
            .expect("Failed to build encoder");
        group.bench_with_input(BenchmarkId::new("parjson", workers), &user, |b, user| {
            b.iter(|| encoder.encode(black_box(user)).expect("encode failed"));
        });
        encoder.shutdown();
    }

    group.bench_function("serde_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)).expect("serde_json failed"));
    });

    group.bench_function("bincode", |b| {
        b.iter(|| {
            bincode::serde::encode_to_vec(black_box(&user), bincode::config::standard())
                .expect("Bincode serialization failed")
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let user = User::sample(CHILD_COUNT);
    let text = Parjson::encode(&user).expect("encode failed");
    let json = serde_json::to_string(&user).expect("serde_json failed");
    let bytes = bincode::serde::encode_to_vec(&user, bincode::config::standard())
        .expect("Bincode serialization failed");

    let mut group = c.benchmark_group("Decode");
    group.throughput(Throughput::Bytes(text.len() as u64));

    for workers in pool_sizes() {
        let decoder = Parjson::builder()
            .workers(workers)
            .decoder()
            .expect("Failed to build decoder");
        group.bench_with_input(BenchmarkId::new("parjson", workers), &text, |b, text| {
            b.iter(|| decoder.decode(black_box(text)).expect("decode failed"));
        });
        decoder.shutdown();
    }

    group.bench_function("serde_json", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json)).expect("serde_json failed"));
    });

    group.bench_function("bincode", |b| {
        b.iter(|| {
            let (user, _): (User, usize) =
                bincode::serde::decode_from_slice(black_box(&bytes), bincode::config::standard())
                    .expect("Bincode deserialization failed");
            user
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
