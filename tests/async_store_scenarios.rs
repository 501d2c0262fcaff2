//! End-to-end async store scenarios through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use pokestore::store::{AsyncStore, AsyncStoreConfig, Store};
use pokestore::value::Async;
use tokio::sync::mpsc;

/// Route store debug events (suppressions, discards) through the test
/// writer so `--nocapture` shows them next to the failing assertion.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pokestore=debug")
        .with_test_writer()
        .try_init();
}

fn immediate() -> AsyncStoreConfig {
    AsyncStoreConfig {
        stale_time: Duration::ZERO,
        debounce_time: Duration::ZERO,
        deduplicate: true,
    }
}

fn emissions(store: &AsyncStore<i32>) -> mpsc::UnboundedReceiver<Async<i32>> {
    init_tracing();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _ = store.subscribe(move |state: &Async<i32>| {
        let _ = tx.send(state.clone());
    });
    // Discard the replay of the initial Empty state.
    assert!(rx.try_recv().expect("replay emission").is_empty());
    rx
}

#[tokio::test(start_paused = true)]
async fn loading_then_data() {
    let store = AsyncStore::with_config(immediate());
    let mut rx = emissions(&store);

    store.run(|| async { Ok(5) });

    assert!(rx.recv().await.unwrap().is_loading());
    assert_eq!(*rx.recv().await.unwrap().get(), 5);
}

#[tokio::test(start_paused = true)]
async fn loading_then_error() {
    let store = AsyncStore::with_config(immediate());
    let mut rx = emissions(&store);

    store.run(|| async { Err(anyhow!("boom")) });

    assert!(rx.recv().await.unwrap().is_loading());
    let settled = rx.recv().await.unwrap();
    assert!(settled.is_error());
    assert_eq!(settled.get_error().to_string(), "boom");
}

#[tokio::test(start_paused = true)]
async fn only_last_call_in_debounce_window_executes() {
    let store = AsyncStore::with_config(AsyncStoreConfig {
        debounce_time: Duration::from_millis(300),
        ..immediate()
    });
    let mut rx = emissions(&store);

    let executions = Arc::new(AtomicUsize::new(0));
    for n in 1..=3 {
        let counter = Arc::clone(&executions);
        store.run(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(n)
        });
    }

    // One Loading for the whole burst, then the last call's result.
    assert!(rx.recv().await.unwrap().is_loading());
    assert_eq!(*rx.recv().await.unwrap().get(), 3);
    assert_eq!(executions.load(Ordering::SeqCst), 1);
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn snapshot_and_stream_agree_after_settle() {
    let store = AsyncStore::with_config(immediate());
    let mut rx = emissions(&store);

    store.run(|| async { Ok(42) });
    assert!(rx.recv().await.unwrap().is_loading());
    let settled = rx.recv().await.unwrap();

    assert_eq!(settled.get_maybe(), store.snapshot().get_maybe());
}

#[tokio::test(start_paused = true)]
async fn store_survives_repeated_failures() {
    let store = AsyncStore::with_config(immediate());
    let mut rx = emissions(&store);

    for attempt in 0..3 {
        store.run(move || async move {
            if attempt < 2 {
                Err(anyhow!("attempt {attempt} failed"))
            } else {
                Ok(attempt)
            }
        });
        assert!(rx.recv().await.unwrap().is_loading());
        let settled = rx.recv().await.unwrap();
        if attempt < 2 {
            assert!(settled.is_error());
        } else {
            assert_eq!(*settled.get(), 2);
        }
    }
}
