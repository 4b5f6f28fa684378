use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::AbortHandle;

use super::loader::BatchResult;

/// Outcome of a batch, shared by all of its waiters.
pub(crate) type Outcome<V, E> = Arc<BatchResult<V, E>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Accepting keys.
    Open,
    /// Detached from the loader and handed to the fetch. No more keys.
    Closing,
    /// Outcome broadcast to the waiters.
    Done,
}

/// A key's seat in a batch.
pub(crate) struct Seat<V, E> {
    pub position: usize,
    pub rx: broadcast::Receiver<Outcome<V, E>>,
    /// `true` for the first key of the batch.
    pub opened: bool,
}

/// Keys collected for one call to the loader.
pub(crate) struct Batch<K, V, E> {
    id: u64,
    keys: Vec<K>,
    positions: HashMap<K, usize>,
    phase: Phase,
    done: broadcast::Sender<Outcome<V, E>>,
    timer: Option<AbortHandle>,
}

impl<K, V, E> Batch<K, V, E>
where
    K: Hash + Eq + Clone,
{
    pub fn new(id: u64) -> Self {
        // a single message is ever sent, every receiver sees it
        let (done, _) = broadcast::channel(1);
        Self {
            id,
            keys: Vec::new(),
            positions: HashMap::new(),
            phase: Phase::Open,
            done,
            timer: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Adds `key` unless it is already part of the batch and subscribes to
    /// the batch outcome.
    pub fn join(&mut self, key: K) -> Seat<V, E> {
        debug_assert_eq!(self.phase, Phase::Open, "joined a batch that is not open");

        let opened = self.keys.is_empty();
        let position = match self.positions.get(&key) {
            Some(position) => *position,
            None => {
                let position = self.keys.len();
                self.positions.insert(key.clone(), position);
                self.keys.push(key);
                position
            }
        };

        Seat { position, rx: self.done.subscribe(), opened }
    }

    pub fn set_timer(&mut self, timer: AbortHandle) {
        self.timer = Some(timer);
    }

    /// Moves the batch from `Open` to `Closing`. Returns `false` if the
    /// batch was not open.
    pub fn close(&mut self) -> bool {
        if self.phase != Phase::Open {
            return false;
        }
        self.phase = Phase::Closing;
        true
    }

    /// Aborts the timer task of the batch, if it still runs.
    pub fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Broadcasts the loader outcome to every waiter.
    pub fn complete(&mut self, outcome: Outcome<V, E>) {
        debug_assert_eq!(self.phase, Phase::Closing, "completed a batch that is not closing");
        self.phase = Phase::Done;
        // no receivers left means nobody is waiting anymore
        let _ = self.done.send(outcome);
    }
}
