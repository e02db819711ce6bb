//! # Tickcount Core
//!
//! Observable counter state for the tickcount architecture.
//!
//! This crate provides the leaf component of the system: [`CounterStore`],
//! a reactive container for the three observable values that describe a
//! play/pause/reset counter, plus the small domain types shared with the
//! runtime.
//!
//! ## Core Concepts
//!
//! - **State**: [`CounterState`] — count, playing flag, reset-visibility flag
//! - **Store**: [`CounterStore`] — owns the state, exposes setters and
//!   observable views
//! - **Observation**: watch channels hold the latest value of each field;
//!   a broadcast feed delivers every [`StateChange`] in mutation order
//! - **Command**: [`Command`] — the two-word vocabulary the presentation
//!   layer speaks to the controller
//!
//! The store performs no validation and has no failure modes; the
//! termination policy (count bound, auto-stop) lives in the runtime crate's
//! controller.
//!
//! ## Example
//!
//! ```
//! use tickcount_core::{CounterStore, StateChange};
//!
//! let store = CounterStore::new();
//! let mut changes = store.changes();
//!
//! store.set_playing(true);
//! store.increment();
//!
//! assert_eq!(changes.try_recv().ok(), Some(StateChange::Playing(true)));
//! assert_eq!(changes.try_recv().ok(), Some(StateChange::Count(1)));
//! ```

/// Commands accepted by the controller
pub mod command;

/// Domain state and change events
pub mod state;

/// The observable counter store
pub mod store;

pub use command::Command;
pub use state::{CounterState, DEFAULT_COUNT_LIMIT, StateChange};
pub use store::CounterStore;
