//! Domain state for the counter.
//!
//! The entire domain is one small record: the current count plus the two UI
//! flags that describe the play/reset controls. The count is driven upward by
//! the runtime's periodic task and lives in `[0, limit]`; the flags are owned
//! by the command handlers.

use serde::{Deserialize, Serialize};

/// Default upper bound for the count.
///
/// The increment task stops itself once the count reaches this value. The
/// bound is configurable per controller; this is the out-of-the-box value.
pub const DEFAULT_COUNT_LIMIT: u8 = 10;

/// Snapshot of the counter's observable state
///
/// A single instance exists per [`CounterStore`](crate::CounterStore) and is
/// mutated only through the store's setters.
///
/// Invariants (maintained by the controller, not validated here):
/// - `count` stays within `[0, limit]`
/// - `is_playing` is `false` whenever `count` has reached the limit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current count value
    pub count: u8,
    /// Whether an increment task is currently running
    pub is_playing: bool,
    /// Whether the reset control is offered to the user
    pub is_reset_visible: bool,
}

impl CounterState {
    /// Creates the initial state: `{0, false, false}`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            is_playing: false,
            is_reset_visible: false,
        }
    }

    /// Whether the count has reached the given bound
    #[must_use]
    pub const fn at_limit(&self, limit: u8) -> bool {
        self.count >= limit
    }
}

/// A single observed mutation of the counter state
///
/// One variant per field. Every store setter broadcasts exactly one of these,
/// in the order mutations were issued, so ordering-sensitive observers can
/// reconstruct the full history. Serializable so observers can forward
/// changes over any wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// The count was set to the contained value
    Count(u8),
    /// The playing flag was set to the contained value
    Playing(bool),
    /// The reset-visibility flag was set to the contained value
    ResetVisible(bool),
}
