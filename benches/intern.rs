use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use strpool::Interner;

pub fn benchmark(c: &mut Criterion) {
    let words: Vec<String> = (0..10_000).map(|i| format!("ident_{}", i % 4096)).collect();

    c.bench_function("intern_10k", |b| {
        b.iter_batched(
            Interner::new,
            |mut pool| {
                for w in &words {
                    black_box(pool.intern(w));
                }
                pool
            },
            BatchSize::SmallInput,
        )
    });

    let mut pool = Interner::new();
    for w in &words {
        pool.intern(w);
    }
    c.bench_function("lookup_10k", |b| {
        b.iter(|| {
            for w in &words {
                black_box(pool.lookup(black_box(w)));
            }
        })
    });

    let mut buf = Vec::new();
    pool.save(&mut buf).unwrap();
    c.bench_function("load_4k_records", |b| {
        b.iter_batched(
            Interner::new,
            |mut pool| {
                pool.load(&mut buf.as_slice()).unwrap();
                pool
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
