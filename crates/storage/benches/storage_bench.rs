use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::thread;

use ferrokv_storage::Db;

fn bench_set_get_sequential(c: &mut Criterion) {
    c.bench_function("set_get_sequential_10k", |b| {
        b.iter(|| {
            let db = Db::new();
            for i in 0..10_000 {
                let key = format!("key:{i}");
                db.set(key.clone(), format!("value:{i}"), None);
                black_box(db.get(&key));
            }
        })
    });
}

fn bench_incr_sequential(c: &mut Criterion) {
    c.bench_function("incr_sequential_10k", |b| {
        b.iter(|| {
            let db = Db::new();
            for _ in 0..10_000 {
                black_box(db.incr("counter").unwrap());
            }
        })
    });
}

fn bench_incr_concurrent(c: &mut Criterion) {
    c.bench_function("incr_concurrent_4_threads_10k", |b| {
        b.iter(|| {
            let db = Db::new();
            thread::scope(|s| {
                for _ in 0..4 {
                    let db = db.clone();
                    s.spawn(move || {
                        for _ in 0..2_500 {
                            black_box(db.incr("counter").unwrap());
                        }
                    });
                }
            });
        })
    });
}

fn bench_list_operations(c: &mut Criterion) {
    c.bench_function("rpush_lpop_1k", |b| {
        b.iter(|| {
            let db = Db::new();
            for i in 0..1_000 {
                db.rpush("list", &[format!("item:{i}")]).unwrap();
            }
            for _ in 0..1_000 {
                black_box(db.lpop("list"));
            }
        })
    });
}

fn bench_hash_operations(c: &mut Criterion) {
    c.bench_function("hset_hget_1k", |b| {
        b.iter(|| {
            let db = Db::new();
            for i in 0..1_000 {
                db.hset("hash", format!("field:{i}"), i.to_string()).unwrap();
            }
            for i in 0..1_000 {
                black_box(db.hget("hash", &format!("field:{i}")));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_set_get_sequential,
    bench_incr_sequential,
    bench_incr_concurrent,
    bench_list_operations,
    bench_hash_operations,
);
criterion_main!(benches);
