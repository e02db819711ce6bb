//! The observable counter store.
//!
//! [`CounterStore`] owns the three observable values (count, playing flag,
//! reset-visibility flag) and the pure mutation operations on them. Each
//! value lives in a [`tokio::sync::watch`] channel, so subscribers always see
//! the latest value without polling; in addition every mutation is broadcast
//! as a [`StateChange`] on a [`tokio::sync::broadcast`] feed for observers
//! that need every update in issue order.
//!
//! All operations are synchronous, non-blocking, and total: no setter
//! validates bounds (the controller owns the termination policy) and no
//! operation can fail.

use std::sync::Mutex;

use tokio::sync::{broadcast, watch};

use crate::state::{CounterState, StateChange};

/// Default capacity of the change broadcast channel.
const DEFAULT_CHANGE_CAPACITY: usize = 16;

/// Observable state container for the counter
///
/// Holds the current value of each field inside a watch channel and pushes
/// every mutation to subscribers. Mutations issued from multiple OS threads
/// are serialized by an internal lock so the single-writer ordering guarantee
/// holds regardless of where commands and ticks run.
///
/// # Example
///
/// ```
/// use tickcount_core::CounterStore;
///
/// let store = CounterStore::new();
/// let mut count = store.watch_count();
///
/// store.increment();
/// assert_eq!(*count.borrow_and_update(), 1);
/// ```
#[derive(Debug)]
pub struct CounterStore {
    count: watch::Sender<u8>,
    playing: watch::Sender<bool>,
    reset_visible: watch::Sender<bool>,
    changes: broadcast::Sender<StateChange>,
    /// Serializes each mutation together with its change broadcast.
    write: Mutex<()>,
}

impl CounterStore {
    /// Creates a store with the initial state `{0, false, false}`
    #[must_use]
    pub fn new() -> Self {
        Self::with_change_capacity(DEFAULT_CHANGE_CAPACITY)
    }

    /// Creates a store with a custom change-feed capacity
    ///
    /// The capacity bounds how far a slow [`changes`](Self::changes)
    /// subscriber may lag before it starts missing events. Watch subscribers
    /// are unaffected; they always see the latest value.
    #[must_use]
    pub fn with_change_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity);
        let initial = CounterState::new();

        Self {
            count: watch::Sender::new(initial.count),
            playing: watch::Sender::new(initial.is_playing),
            reset_visible: watch::Sender::new(initial.is_reset_visible),
            changes,
            write: Mutex::new(()),
        }
    }

    // ===== Mutations =====

    /// Sets the count to `value`
    ///
    /// No bounds validation is performed here; the controller is responsible
    /// for keeping the count within `[0, limit]`.
    pub fn set_count(&self, value: u8) {
        let _order = self.lock_writes();
        self.count.send_replace(value);
        self.publish(StateChange::Count(value));
    }

    /// Increments the count by one, saturating at [`u8::MAX`]
    pub fn increment(&self) {
        let _order = self.lock_writes();
        let next = self.count.borrow().saturating_add(1);
        self.count.send_replace(next);
        self.publish(StateChange::Count(next));
    }

    /// Sets the playing flag
    pub fn set_playing(&self, flag: bool) {
        let _order = self.lock_writes();
        self.playing.send_replace(flag);
        self.publish(StateChange::Playing(flag));
    }

    /// Sets the reset-visibility flag
    pub fn set_reset_visible(&self, flag: bool) {
        let _order = self.lock_writes();
        self.reset_visible.send_replace(flag);
        self.publish(StateChange::ResetVisible(flag));
    }

    // ===== Reads =====

    /// Current count
    #[must_use]
    pub fn count(&self) -> u8 {
        *self.count.borrow()
    }

    /// Current playing flag
    #[must_use]
    pub fn is_playing(&self) -> bool {
        *self.playing.borrow()
    }

    /// Current reset-visibility flag
    #[must_use]
    pub fn is_reset_visible(&self) -> bool {
        *self.reset_visible.borrow()
    }

    /// Consistent snapshot of all three fields
    #[must_use]
    pub fn snapshot(&self) -> CounterState {
        let _order = self.lock_writes();
        CounterState {
            count: *self.count.borrow(),
            is_playing: *self.playing.borrow(),
            is_reset_visible: *self.reset_visible.borrow(),
        }
    }

    // ===== Observation =====

    /// Read-only observable view of the count
    ///
    /// The receiver holds the latest value; awaiting
    /// [`changed`](watch::Receiver::changed) suspends until the next
    /// mutation.
    #[must_use]
    pub fn watch_count(&self) -> watch::Receiver<u8> {
        self.count.subscribe()
    }

    /// Read-only observable view of the playing flag
    #[must_use]
    pub fn watch_playing(&self) -> watch::Receiver<bool> {
        self.playing.subscribe()
    }

    /// Read-only observable view of the reset-visibility flag
    #[must_use]
    pub fn watch_reset_visible(&self) -> watch::Receiver<bool> {
        self.reset_visible.subscribe()
    }

    /// Subscribes to the change feed
    ///
    /// Unlike the watch views, the feed delivers every mutation in the order
    /// it was issued. A receiver that lags more than the channel capacity
    /// skips ahead and observes [`broadcast::error::RecvError::Lagged`].
    #[must_use]
    pub fn changes(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    // ===== Internals =====

    // Panic on mutex poison is acceptable - it's unrecoverable
    #[allow(clippy::unwrap_used)]
    fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write.lock().unwrap()
    }

    fn publish(&self, change: StateChange) {
        tracing::trace!(?change, "state mutated");
        // Err means no subscriber is attached, which is fine
        let _ = self.changes.send(change);
    }
}

impl Default for CounterStore {
    fn default() -> Self {
        Self::new()
    }
}
