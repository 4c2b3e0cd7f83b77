//! Background snapshot writer.
//!
//! # Responsibility
//! - Accept writes without blocking the caller.
//! - Apply them on one dedicated thread, in order, coalesced per key.
//! - Let callers wait for durability through `flush`.
//!
//! # Invariants
//! - At most one write is in flight at a time.
//! - A queued value for a key replaces an older queued value for that key,
//!   so a stale snapshot is never written after a newer one.
//! - Dropping the writer drains the queue before the thread exits.

use crate::repo::kv_store::{KeyValueStore, StorageError, StorageResult};
use log::{debug, error};
use std::collections::BTreeMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Instant;

const WRITER_THREAD_NAME: &str = "giftbook-writer";

#[derive(Default)]
struct QueueState {
    pending: BTreeMap<String, String>,
    in_flight: bool,
    shutdown: bool,
    first_error: Option<StorageError>,
}

struct Shared<S> {
    store: Mutex<S>,
    queue: Mutex<QueueState>,
    changed: Condvar,
}

impl<S> Shared<S> {
    fn queue(&self) -> MutexGuard<'_, QueueState> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, QueueState>) -> MutexGuard<'a, QueueState> {
        self.changed
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until nothing is queued or being written.
    fn wait_idle(&self) -> MutexGuard<'_, QueueState> {
        let mut state = self.queue();
        while !state.pending.is_empty() || state.in_flight {
            state = self.wait(state);
        }
        state
    }
}

/// Key-value store adapter that performs writes on a background thread.
pub struct BackgroundWriter<S: KeyValueStore + Send + 'static> {
    shared: Arc<Shared<S>>,
    handle: Option<JoinHandle<()>>,
}

impl<S: KeyValueStore + Send + 'static> BackgroundWriter<S> {
    /// Starts the writer thread over `store`.
    pub fn spawn(store: S) -> StorageResult<Self> {
        let shared = Arc::new(Shared {
            store: Mutex::new(store),
            queue: Mutex::new(QueueState::default()),
            changed: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run_writer(&worker))
            .map_err(StorageError::Spawn)?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Number of writes queued but not yet started.
    pub fn pending(&self) -> usize {
        self.shared.queue().pending.len()
    }

    /// Runs `f` against the wrapped store once all queued writes landed.
    pub fn with_store<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        let _idle = self.shared.wait_idle();
        let store = self
            .shared
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }
}

impl<S: KeyValueStore + Send + 'static> KeyValueStore for BackgroundWriter<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.with_store(|store| store.get_item(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut state = self.shared.queue();
        if state.shutdown {
            return Err(StorageError::Unavailable(
                "background writer is shutting down".to_string(),
            ));
        }
        state.pending.insert(key.to_string(), value.to_string());
        drop(state);
        self.shared.changed.notify_all();
        Ok(())
    }

    /// Waits for queued writes and returns the first failure since the
    /// previous flush.
    fn flush(&self) -> StorageResult<()> {
        let mut state = self.shared.wait_idle();
        match state.first_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<S: KeyValueStore + Send + 'static> Drop for BackgroundWriter<S> {
    fn drop(&mut self) {
        self.shared.queue().shutdown = true;
        self.shared.changed.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("event=writer_stop module=writer status=error error_code=thread_panicked");
            }
        }
    }
}

fn run_writer<S: KeyValueStore>(shared: &Shared<S>) {
    loop {
        let batch = {
            let mut state = shared.queue();
            while state.pending.is_empty() && !state.shutdown {
                state = shared.wait(state);
            }
            if state.pending.is_empty() {
                break;
            }
            state.in_flight = true;
            std::mem::take(&mut state.pending)
        };

        let mut failure = None;
        for (key, value) in batch {
            let started_at = Instant::now();
            let result = shared
                .store
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .set_item(&key, &value);
            match result {
                Ok(()) => debug!(
                    "event=snapshot_write module=writer status=ok key={key} bytes={} duration_ms={}",
                    value.len(),
                    started_at.elapsed().as_millis()
                ),
                Err(err) => {
                    error!(
                        "event=snapshot_write module=writer status=error key={key} duration_ms={} error={err}",
                        started_at.elapsed().as_millis()
                    );
                    failure.get_or_insert(err);
                }
            }
        }

        let mut state = shared.queue();
        state.in_flight = false;
        if state.first_error.is_none() {
            state.first_error = failure;
        }
        drop(state);
        shared.changed.notify_all();
    }
}
