//! # Tickcount Runtime
//!
//! Controller runtime for the tickcount architecture.
//!
//! This crate provides [`CounterController`], the component that mediates
//! the play/pause and reset commands against a
//! [`CounterStore`](tickcount_core::CounterStore) and owns the lifecycle of
//! the single periodic increment task.
//!
//! ## Core Components
//!
//! - **Controller**: dispatches [`Command`]s, guaranteeing at most one
//!   active increment task at any time
//! - **Increment task**: a spawned loop that increments the count once per
//!   tick interval until the count limit is reached, then clears the
//!   playing flag and exits
//! - **Cancellation**: cooperative, signalled over a watch channel and
//!   observed at the inter-tick boundary, never mid-increment
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tickcount_core::CounterStore;
//! use tickcount_runtime::CounterController;
//!
//! # async fn example() {
//! let store = Arc::new(CounterStore::new());
//! let controller = CounterController::new(Arc::clone(&store));
//!
//! controller.on_play();
//! assert!(store.is_playing());
//!
//! controller.on_play(); // toggle: pause
//! assert!(!store.is_playing());
//! # let _ = controller.shutdown().await;
//! # }
//! ```

use std::time::Duration;

use tickcount_core::DEFAULT_COUNT_LIMIT;

/// Error types for the controller runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during controller operations
    ///
    /// Every command is total, so errors only surface at the lifecycle
    /// boundary: shutting down joins the increment task, and a panicked
    /// task turns into a join error there.
    #[derive(Error, Debug)]
    pub enum ControllerError {
        /// The increment task panicked and the panic surfaced at join time
        #[error("Increment task failed: {0}")]
        TaskJoin(#[from] tokio::task::JoinError),
    }
}

pub use error::ControllerError;

/// Configuration for the controller
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tickcount_runtime::ControllerConfig;
///
/// let config = ControllerConfig::default()
///     .with_tick_interval(Duration::from_millis(250))
///     .with_count_limit(5);
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Wall-clock interval between increments
    pub tick_interval: Duration,
    /// Bound at which the increment task stops itself
    pub count_limit: u8,
}

impl ControllerConfig {
    /// Creates a configuration with custom values
    #[must_use]
    pub const fn new(tick_interval: Duration, count_limit: u8) -> Self {
        Self {
            tick_interval,
            count_limit,
        }
    }

    /// Sets the tick interval
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Sets the count limit
    #[must_use]
    pub const fn with_count_limit(mut self, limit: u8) -> Self {
        self.count_limit = limit;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            count_limit: DEFAULT_COUNT_LIMIT,
        }
    }
}

/// Controller module - command handling and task lifecycle
pub mod controller {
    use std::sync::{Arc, Mutex, MutexGuard};
    use std::time::Duration;

    use tickcount_core::{Command, CounterStore};
    use tokio::sync::watch;
    use tokio::task::JoinHandle;

    use super::{ControllerConfig, ControllerError};

    /// Handle to the running periodic increment job
    ///
    /// At most one is active at any time; it is exclusively owned by the
    /// controller's task slot. Cancelling or replacing the handle
    /// invalidates it - a fresh task is spawned for each play cycle, and a
    /// cancelled or completed task is never reused.
    #[derive(Debug)]
    struct IncrementTask {
        cancel: watch::Sender<bool>,
        handle: JoinHandle<()>,
    }

    impl IncrementTask {
        /// Spawns the tick loop.
        ///
        /// The loop checks the termination condition before each tick and
        /// observes cancellation only while sleeping between ticks. On
        /// natural completion (count reached the limit) it clears the
        /// playing flag itself; on cancellation it exits without touching
        /// the flags - the cancelling command already wrote them, and a
        /// late write would clobber a successor task's state.
        fn spawn(store: Arc<CounterStore>, interval: Duration, limit: u8) -> Self {
            let (cancel, mut cancelled) = watch::channel(false);

            let handle = tokio::spawn(async move {
                loop {
                    if store.count() >= limit {
                        tracing::debug!(limit, "count reached the limit, auto-stopping");
                        store.set_playing(false);
                        break;
                    }

                    tokio::select! {
                        // Cancellation is polled first so a cancel issued
                        // before this poll wins over an expired tick.
                        biased;
                        _ = cancelled.changed() => {
                            tracing::trace!("increment task cancelled");
                            break;
                        }
                        () = tokio::time::sleep(interval) => {
                            store.increment();
                            metrics::counter!("controller.ticks.total").increment(1);
                            tracing::trace!(count = store.count(), "tick");
                        }
                    }
                }
            });

            Self { cancel, handle }
        }

        /// Signals cooperative cancellation.
        ///
        /// Safe no-op if the task has already completed or was cancelled
        /// before.
        fn cancel(&self) {
            let _ = self.cancel.send(true);
        }

        /// Whether the task is still running
        fn is_active(&self) -> bool {
            !self.handle.is_finished()
        }

        /// Waits for the task to terminate
        async fn join(self) -> Result<(), tokio::task::JoinError> {
            self.handle.await
        }
    }

    /// The controller - mediates commands against the store
    ///
    /// Holds the single task slot; starting a new task first invalidates
    /// the old handle so two increment loops can never race on the same
    /// count.
    ///
    /// Command handlers are synchronous and non-blocking; the periodic task
    /// is the only suspending operation in the system.
    #[derive(Debug)]
    pub struct CounterController {
        store: Arc<CounterStore>,
        config: ControllerConfig,
        task: Mutex<Option<IncrementTask>>,
    }

    impl CounterController {
        /// Creates a controller with the default configuration
        /// (1-second ticks, count limit 10)
        #[must_use]
        pub fn new(store: Arc<CounterStore>) -> Self {
            Self::with_config(store, ControllerConfig::default())
        }

        /// Creates a controller with a custom configuration
        #[must_use]
        pub const fn with_config(store: Arc<CounterStore>, config: ControllerConfig) -> Self {
            Self {
                store,
                config,
                task: Mutex::new(None),
            }
        }

        /// The store this controller mutates
        #[must_use]
        pub const fn store(&self) -> &Arc<CounterStore> {
            &self.store
        }

        /// Dispatches a command
        ///
        /// Single entry point for the command vocabulary; [`on_play`] and
        /// [`on_reset`] forward here.
        ///
        /// [`on_play`]: Self::on_play
        /// [`on_reset`]: Self::on_reset
        #[tracing::instrument(skip(self), name = "dispatch_command", fields(command = %command))]
        pub fn dispatch(&self, command: Command) {
            metrics::counter!("controller.commands.total", "command" => command.as_str())
                .increment(1);

            match command {
                Command::Play => self.toggle_play(),
                Command::Reset => self.reset(),
            }
        }

        /// Play/pause toggle: starts the increment task when idle, cancels
        /// it when running
        pub fn on_play(&self) {
            self.dispatch(Command::Play);
        }

        /// Reset: stops the task and clears the counter
        ///
        /// A no-op until the first play cycle has started.
        pub fn on_reset(&self) {
            self.dispatch(Command::Reset);
        }

        /// Whether an increment task is currently active
        #[must_use]
        pub fn is_running(&self) -> bool {
            self.lock_task().as_ref().is_some_and(IncrementTask::is_active)
        }

        /// Cancels the active task (if any) and waits for it to terminate
        ///
        /// Clears the playing flag when it cancels a live task, then
        /// empties the task slot, so afterwards the controller behaves as
        /// freshly constructed: reset is a no-op again until the next play.
        /// Idempotent.
        ///
        /// # Errors
        ///
        /// Returns [`ControllerError::TaskJoin`] if the increment task
        /// panicked.
        pub async fn shutdown(&self) -> Result<(), ControllerError> {
            let task = self.lock_task().take();

            if let Some(task) = task {
                if task.is_active() && self.store.is_playing() {
                    self.store.set_playing(false);
                }
                task.cancel();
                task.join().await?;
            }

            tracing::debug!("controller shut down");
            Ok(())
        }

        /// Idle -> Running, or Running -> Idle.
        ///
        /// Order matters and mirrors the store's observable contract: the
        /// playing flag flips first, any prior task is cancelled, and only
        /// then is a fresh task spawned (with reset made visible) when
        /// starting.
        fn toggle_play(&self) {
            let mut slot = self.lock_task();

            let playing = !self.store.is_playing();
            self.store.set_playing(playing);

            if let Some(task) = slot.as_ref() {
                task.cancel();
            }

            if playing {
                self.store.set_reset_visible(true);
                *slot = Some(IncrementTask::spawn(
                    Arc::clone(&self.store),
                    self.config.tick_interval,
                    self.config.count_limit,
                ));
                metrics::counter!("controller.tasks.started").increment(1);
                tracing::debug!("started increment task");
            } else {
                tracing::debug!(count = self.store.count(), "paused");
            }
        }

        /// Any state -> Idle with cleared count.
        ///
        /// Only meaningful once a play cycle has started; before that the
        /// task slot has never been filled and the command is ignored.
        fn reset(&self) {
            let slot = self.lock_task();

            let Some(task) = slot.as_ref() else {
                tracing::debug!("reset ignored: no play cycle has started yet");
                return;
            };

            self.store.set_playing(false);
            self.store.set_count(0);
            self.store.set_reset_visible(false);

            if task.is_active() {
                task.cancel();
                metrics::counter!("controller.tasks.cancelled").increment(1);
            }
        }

        // Panic on mutex poison is acceptable - it's unrecoverable
        #[allow(clippy::unwrap_used)]
        fn lock_task(&self) -> MutexGuard<'_, Option<IncrementTask>> {
            self.task.lock().unwrap()
        }
    }
}

pub use controller::CounterController;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tickcount_core::{CounterState, CounterStore};
    use tokio_test::assert_ok;

    #[test]
    fn config_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.count_limit, DEFAULT_COUNT_LIMIT);
    }

    #[test]
    fn config_builders() {
        let config = ControllerConfig::default()
            .with_tick_interval(Duration::from_millis(50))
            .with_count_limit(3);
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.count_limit, 3);
    }

    #[test]
    fn reset_before_any_play_is_a_no_op() {
        let store = Arc::new(CounterStore::new());
        let controller = CounterController::new(Arc::clone(&store));
        let mut changes = store.changes();

        controller.on_reset();

        assert_eq!(store.snapshot(), CounterState::new());
        assert!(changes.try_recv().is_err());
        assert!(!controller.is_running());
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let store = Arc::new(CounterStore::new());
        let controller = CounterController::new(store);

        assert_ok!(controller.shutdown().await);
        assert_ok!(controller.shutdown().await);
    }
}
