use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use evreg_storage::{Collection, LoadPolicy, Storage};
use serde_json::{Value, json};
use std::hint::black_box;
use tempfile::TempDir;

fn registrations(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "name": format!("Student {i}"),
                "email": format!("student{i}@campus.edu"),
                "studentId": format!("{i:012}"),
                "events": ["Chess", "Football"],
            })
        })
        .collect()
}

fn bench_path_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_resolution");

    let temp = TempDir::new().unwrap();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let storage = rt.block_on(async { Storage::builder().root(temp.path()).connect().await.unwrap() });

    group.bench_function("flat", |b| b.iter(|| black_box(storage.resolve("events.json").unwrap())));
    group.bench_function("nested", |b| {
        b.iter(|| black_box(storage.resolve("a/b/c/registrations.json").unwrap()));
    });

    group.finish();
}

fn bench_collection_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_cycle");
    let rt = tokio::runtime::Runtime::new().unwrap();

    for size in [10usize, 100, 1_000] {
        let temp = TempDir::new().unwrap();
        let collection: Collection<Value> = rt.block_on(async {
            let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
            let collection = Collection::new(storage, "registrations.json", LoadPolicy::Strict);
            collection.lock().await.save(&registrations(size)).await.unwrap();
            collection
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("load", size), &size, |b, _| {
            b.to_async(&rt).iter(|| async { black_box(collection.load().await.unwrap()) });
        });
        group.bench_with_input(BenchmarkId::new("load_save", size), &size, |b, _| {
            b.to_async(&rt).iter(|| async {
                let guard = collection.lock().await;
                let items = guard.load().await.unwrap();
                guard.save(&items).await.unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_path_resolution, bench_collection_cycle);
criterion_main!(benches);
