//! Capture-and-inspect test double for the store's change feed.

use tickcount_core::{CounterStore, StateChange};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Records every [`StateChange`] a store broadcasts, in order
///
/// Attach a recorder before driving the system, then [`drain`](Self::drain)
/// to inspect what happened since the last drain. Receiving is pull-based
/// (no background task), so the recorder works in both sync and async tests.
///
/// # Example
///
/// ```
/// use tickcount_core::{CounterStore, StateChange};
/// use tickcount_testing::ChangeRecorder;
///
/// let store = CounterStore::new();
/// let mut recorder = ChangeRecorder::attach(&store);
///
/// store.set_playing(true);
/// store.increment();
///
/// assert_eq!(
///     recorder.drain(),
///     vec![StateChange::Playing(true), StateChange::Count(1)],
/// );
/// ```
#[derive(Debug)]
pub struct ChangeRecorder {
    rx: broadcast::Receiver<StateChange>,
    seen: Vec<StateChange>,
    missed: u64,
}

impl ChangeRecorder {
    /// Attaches a recorder to the store's change feed
    #[must_use]
    pub fn attach(store: &CounterStore) -> Self {
        Self {
            rx: store.changes(),
            seen: Vec::new(),
            missed: 0,
        }
    }

    /// Returns all changes received since the last drain, in broadcast order
    ///
    /// Changes dropped because the recorder lagged behind the channel
    /// capacity are counted in [`missed`](Self::missed) rather than
    /// silently ignored.
    pub fn drain(&mut self) -> Vec<StateChange> {
        loop {
            match self.rx.try_recv() {
                Ok(change) => self.seen.push(change),
                Err(TryRecvError::Lagged(skipped)) => self.missed += skipped,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        std::mem::take(&mut self.seen)
    }

    /// Number of changes lost to channel lag since attachment
    #[must_use]
    pub const fn missed(&self) -> u64 {
        self.missed
    }

    /// Asserts that exactly `expected` changes arrived since the last drain
    ///
    /// # Panics
    ///
    /// Panics if the drained changes differ from `expected`.
    #[allow(clippy::panic)] // Test assertion
    pub fn expect_changes(&mut self, expected: &[StateChange]) {
        let got = self.drain();
        assert_eq!(
            got, expected,
            "change feed mismatch: got {got:?}, expected {expected:?}"
        );
    }
}
