//! # Tickcount Testing
//!
//! Testing utilities and helpers for the tickcount architecture.
//!
//! This crate provides:
//! - [`ChangeRecorder`]: captures a store's change feed for in-order
//!   assertions
//! - Harness constructors ([`test_store`], [`test_controller`]) for
//!   store/controller pairs
//! - Proptest [`strategies`] for command sequences
//!
//! ## Example
//!
//! ```
//! use tickcount_core::StateChange;
//! use tickcount_testing::{ChangeRecorder, test_controller};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (store, controller) = test_controller();
//! let mut recorder = ChangeRecorder::attach(&store);
//!
//! controller.on_play();
//!
//! assert_eq!(
//!     recorder.drain(),
//!     vec![StateChange::Playing(true), StateChange::ResetVisible(true)],
//! );
//! # controller.shutdown().await.expect("shutdown");
//! # }
//! ```

use std::sync::Arc;

use tickcount_core::CounterStore;
use tickcount_runtime::{ControllerConfig, CounterController};

/// Capture-and-inspect double for the change feed
pub mod recorder;

/// Proptest strategies for domain types
pub mod strategies;

pub use recorder::ChangeRecorder;

/// Creates a fresh store, shared-ownership wrapped for a controller
#[must_use]
pub fn test_store() -> Arc<CounterStore> {
    Arc::new(CounterStore::new())
}

/// Creates a store/controller pair with the default configuration
#[must_use]
pub fn test_controller() -> (Arc<CounterStore>, CounterController) {
    test_controller_with(ControllerConfig::default())
}

/// Creates a store/controller pair with a custom configuration
#[must_use]
pub fn test_controller_with(config: ControllerConfig) -> (Arc<CounterStore>, CounterController) {
    let store = test_store();
    let controller = CounterController::with_config(Arc::clone(&store), config);
    (store, controller)
}

/// Installs a compact tracing subscriber for test output
///
/// Honors `RUST_LOG`; defaults to `tickcount=debug`. Safe to call from
/// multiple tests - later calls are no-ops.
pub fn init_test_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickcount=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
