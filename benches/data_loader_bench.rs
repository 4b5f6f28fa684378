use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use kontrakt_dataloader::core::data_loader::{BatchResult, DataLoader, Loader};

#[derive(Clone, Default)]
struct CountingLoader {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Loader<u64> for CountingLoader {
    type Value = String;
    type Error = ();

    async fn load(&self, keys: &[u64]) -> BatchResult<String, ()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_micros(100)).await;
        Ok(keys.iter().map(|key| Ok(format!("value_{}", key))).collect())
    }
}

fn benchmark_data_loader(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("data loader concurrent access", |b| {
        b.to_async(&runtime).iter(|| async {
            let loader = CountingLoader::default();
            let calls = loader.calls.clone();
            let data_loader = DataLoader::new(loader).max_batch_size(1000);
            let mut handles = Vec::new();

            // 10_000 lookups over 1_000 distinct keys
            for i in 0..10_000u64 {
                let data_loader = data_loader.clone();
                handles.push(tokio::spawn(async move { data_loader.load(i % 1000).await }));
            }

            for handle in handles {
                let _ = handle.await.unwrap();
            }

            assert!(calls.load(Ordering::SeqCst) >= 1);
        });
    });

    c.bench_function("data loader cached lookups", |b| {
        b.to_async(&runtime).iter(|| async {
            let data_loader = DataLoader::new(CountingLoader::default());
            data_loader.load_many(0..100).await;

            for i in 0..100 {
                let _ = data_loader.load(i).await;
            }
        });
    });
}

criterion_group!(benches, benchmark_data_loader);
criterion_main!(benches);
