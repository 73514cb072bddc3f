//! Bounded, in-memory record of processed webhook event ids.
//!
//! Each id is processed at most once for the life of the process, subject to
//! FIFO eviction once the set reaches capacity. Nothing here survives a
//! restart.
//!
//! ## Claims
//!
//! Checking and recording an id are two steps separated by verification and
//! dispatch. To keep that sequence atomic per id, callers first [`claim`] the
//! id:
//!
//! 1. If the id is already seen, the claim returns [`Claim::Seen`].
//! 2. If another request is processing the same id, the call waits for that
//!    request to finish and then looks again.
//! 3. Otherwise the caller gets an [`EventClaim`] and exclusive ownership of
//!    the id until it commits or drops the claim.
//!
//! A dropped claim (rejection, handler error, panic) leaves no trace, so the
//! sender can retry the event.
//!
//! [`claim`]: SeenEventSet::claim

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

/// Default number of event ids remembered.
pub const DEFAULT_SEEN_EVENT_CAPACITY: usize = 10_000;

#[derive(Default)]
struct SeenState {
    seen: HashSet<String>,
    /// Insertion order of `seen`, oldest first.
    order: VecDeque<String>,
    /// Ids currently owned by an outstanding claim. The sender half lives in
    /// the claim; it closes the channel when dropped.
    in_flight: HashMap<String, watch::Receiver<()>>,
}

impl SeenState {
    /// Inserts an id, evicting the oldest entry when over capacity.
    ///
    /// Returns `(inserted, evicted)`.
    fn record(&mut self, event_id: &str, capacity: usize) -> (bool, Option<String>) {
        if !self.seen.insert(event_id.to_owned()) {
            return (false, None);
        }
        self.order.push_back(event_id.to_owned());

        let mut evicted = None;
        while self.order.len() > capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
                evicted = Some(oldest);
            }
        }
        (true, evicted)
    }
}

/// Process-wide set of event ids that have been fully processed.
pub struct SeenEventSet {
    capacity: usize,
    state: Mutex<SeenState>,
}

/// Outcome of [`SeenEventSet::claim`].
#[must_use]
pub enum Claim<'a> {
    /// The id was processed before.
    Seen,
    /// The caller now owns the id.
    Fresh(EventClaim<'a>),
}

impl SeenEventSet {
    /// Creates an empty set. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(SeenState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, event_id: &str) -> bool {
        self.lock().seen.contains(event_id)
    }

    /// Records an id directly, bypassing claims.
    ///
    /// Returns false if the id was already present.
    pub fn insert(&self, event_id: &str) -> bool {
        self.lock().record(event_id, self.capacity).0
    }

    /// Claims an id for processing, waiting out any in-flight claim on it.
    pub async fn claim(&self, event_id: &str) -> Claim<'_> {
        loop {
            let mut in_flight = {
                let mut state = self.lock();
                if state.seen.contains(event_id) {
                    return Claim::Seen;
                }
                match state.in_flight.get(event_id) {
                    Some(rx) => rx.clone(),
                    None => {
                        let (tx, rx) = watch::channel(());
                        state.in_flight.insert(event_id.to_owned(), rx);
                        return Claim::Fresh(EventClaim {
                            set: self,
                            event_id: event_id.to_owned(),
                            committed: false,
                            _release: tx,
                        });
                    }
                }
            };

            // Nothing is ever sent; this resolves once the owning claim drops.
            let _ = in_flight.changed().await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, SeenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SeenEventSet {
    fn default() -> Self {
        Self::new(DEFAULT_SEEN_EVENT_CAPACITY)
    }
}

impl std::fmt::Debug for SeenEventSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SeenEventSet")
            .field("capacity", &self.capacity)
            .field("len", &state.seen.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

/// Exclusive ownership of one event id while it is being processed.
///
/// Commit to mark the id seen; drop to release it unseen.
#[must_use = "dropping a claim releases the event id without marking it seen"]
pub struct EventClaim<'a> {
    set: &'a SeenEventSet,
    event_id: String,
    committed: bool,
    // Dropped after `Drop::drop` clears the in-flight entry, which wakes waiters.
    _release: watch::Sender<()>,
}

impl EventClaim<'_> {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Marks the id seen and releases the claim.
    ///
    /// Returns the id evicted to stay within capacity, if any.
    pub fn commit(mut self) -> Option<String> {
        let mut state = self.set.lock();
        state.in_flight.remove(&self.event_id);
        let (_, evicted) = state.record(&self.event_id, self.set.capacity);
        drop(state);

        self.committed = true;
        evicted
    }
}

impl Drop for EventClaim<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.set.lock().in_flight.remove(&self.event_id);
        }
    }
}
