use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrucache::LruCache;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = LruCache::new(1000);
        for i in 0..100u64 {
            cache.put(i, vec![b'x'; 1024]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)).is_some());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let mut cache = LruCache::new(1000);
        for i in 0..100u64 {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter % 100)).copied());
            } else {
                black_box(cache.put(counter, counter));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_evicting", |b| {
        let mut evictions = 0u64;
        let mut cache = LruCache::new(10); // Small cache
        for i in 0..10u64 {
            cache.put(i, i);
        }

        let mut counter = 10u64;
        b.iter(|| {
            // Every put of a fresh key pushes the tail out
            if cache.put(counter, counter) {
                evictions += 1;
            }
            counter += 1;
        });
        black_box(evictions);
    });

    group.bench_function("resize_shrink_1000", |b| {
        b.iter(|| {
            let mut cache = LruCache::new(1000);
            for i in 0..1000u64 {
                cache.put(i, i);
            }
            black_box(cache.resize(10).ok());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_eviction
);
criterion_main!(benches);
