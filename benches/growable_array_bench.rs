use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use growable_array::GrowableArray;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_push(c: &mut Criterion) {
    c.bench_function("growable_array_push_10k", |b| {
        b.iter(|| {
            let mut v = GrowableArray::new();
            for x in lcg(1).take(10_000) {
                v.push(x);
            }
            black_box(v)
        })
    });
}

fn bench_push_reserved(c: &mut Criterion) {
    c.bench_function("growable_array_push_10k_reserved", |b| {
        b.iter(|| {
            let mut v = GrowableArray::with_capacity(10_000);
            for x in lcg(1).take(10_000) {
                v.push(x);
            }
            black_box(v)
        })
    });
}

fn bench_insert_front(c: &mut Criterion) {
    c.bench_function("growable_array_insert_front_1k", |b| {
        b.iter(|| {
            let mut v = GrowableArray::new();
            for x in lcg(3).take(1_000) {
                v.insert(0, x);
            }
            black_box(v)
        })
    });
}

fn bench_erase_middle(c: &mut Criterion) {
    c.bench_function("growable_array_erase_middle_1k", |b| {
        b.iter_batched(
            || lcg(5).take(2_000).collect::<GrowableArray<u64>>(),
            |mut v| {
                for _ in 0..1_000 {
                    let mid = v.len() / 2;
                    v.erase(mid);
                }
                black_box(v)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_clone(c: &mut Criterion) {
    c.bench_function("growable_array_clone_10k", |b| {
        let v: GrowableArray<u64> = lcg(7).take(10_000).collect();
        b.iter(|| black_box(v.clone()))
    });
}

fn bench_at(c: &mut Criterion) {
    c.bench_function("growable_array_at_hit", |b| {
        let v: GrowableArray<u64> = lcg(9).take(4_096).collect();
        let mut idx = lcg(11).map(|x| (x as usize) & 4_095);
        b.iter(|| {
            let i = idx.next().unwrap();
            black_box(v.at(i).ok());
        })
    });
}

// Each routine runs in well under a millisecond.
fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(200)
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_millis(500))
        .noise_threshold(0.03)
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_push, bench_push_reserved, bench_insert_front, bench_erase_middle, bench_clone, bench_at
}
criterion_main!(benches);
