//! Integration tests for the controller against the store
//!
//! All tests run on tokio's paused clock, so the 1-second default tick is
//! exercised deterministically and instantly.

#![allow(clippy::expect_used)] // test code unwraps channel results

use std::time::Duration;

use tickcount_core::{CounterState, StateChange};
use tickcount_testing::{ChangeRecorder, test_controller};

#[tokio::test(start_paused = true)]
async fn play_runs_to_the_limit_and_auto_stops() {
    let (store, controller) = test_controller();
    let mut count = store.watch_count();

    controller.on_play();
    assert_eq!(
        store.snapshot(),
        CounterState {
            count: 0,
            is_playing: true,
            is_reset_visible: true,
        }
    );
    assert!(controller.is_running());

    for expected in 1..=10u8 {
        count.changed().await.expect("count change");
        assert_eq!(*count.borrow_and_update(), expected);
    }

    // the task observed the bound after its final tick and stopped itself
    assert_eq!(
        store.snapshot(),
        CounterState {
            count: 10,
            is_playing: false,
            is_reset_visible: true,
        }
    );
    assert!(!controller.is_running());

    // no further increments after the auto-stop
    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(store.count(), 10);

    controller.on_reset();
    assert_eq!(store.snapshot(), CounterState::new());
}

#[tokio::test(start_paused = true)]
async fn pause_before_the_first_tick_leaves_count_unchanged() {
    let (store, controller) = test_controller();

    controller.on_play();
    controller.on_play();

    // isResetVisible stays true after a pause, by contract
    assert_eq!(
        store.snapshot(),
        CounterState {
            count: 0,
            is_playing: false,
            is_reset_visible: true,
        }
    );

    // the cancelled task must not tick even once the interval elapses
    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(store.count(), 0);
    assert!(!controller.is_running());
}

#[tokio::test(start_paused = true)]
async fn pause_mid_run_keeps_reset_available() {
    let (store, controller) = test_controller();
    let mut count = store.watch_count();

    controller.on_play();
    for _ in 0..2 {
        count.changed().await.expect("count change");
    }

    controller.on_play();
    assert_eq!(
        store.snapshot(),
        CounterState {
            count: 2,
            is_playing: false,
            is_reset_visible: true,
        }
    );

    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(store.count(), 2);

    controller.on_reset();
    assert_eq!(store.snapshot(), CounterState::new());
}

#[tokio::test(start_paused = true)]
async fn resume_continues_from_the_paused_count() {
    let (store, controller) = test_controller();
    let mut count = store.watch_count();

    controller.on_play();
    for _ in 0..2 {
        count.changed().await.expect("count change");
    }
    controller.on_play(); // pause at 2

    controller.on_play(); // resume
    count.changed().await.expect("count change");
    assert_eq!(*count.borrow_and_update(), 3);
    assert!(store.is_playing());
}

#[tokio::test(start_paused = true)]
async fn reset_while_running_stops_the_task() {
    let (store, controller) = test_controller();
    let mut count = store.watch_count();

    controller.on_play();
    for _ in 0..3 {
        count.changed().await.expect("count change");
    }

    controller.on_reset();
    assert_eq!(store.snapshot(), CounterState::new());

    tokio::task::yield_now().await;
    assert!(!controller.is_running());

    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(store.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn play_at_the_limit_stops_immediately() {
    let (store, controller) = test_controller();
    let mut count = store.watch_count();

    controller.on_play();
    for _ in 0..10 {
        count.changed().await.expect("count change");
    }
    assert!(!store.is_playing());

    // play again without reset: the fresh task observes the bound before
    // its first tick and stops itself
    controller.on_play();
    tokio::task::yield_now().await;

    assert_eq!(
        store.snapshot(),
        CounterState {
            count: 10,
            is_playing: false,
            is_reset_visible: true,
        }
    );

    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(store.count(), 10);
}

#[tokio::test(start_paused = true)]
async fn changes_are_broadcast_in_command_order() {
    let (store, controller) = test_controller();
    let mut recorder = ChangeRecorder::attach(&store);
    let mut count = store.watch_count();

    controller.on_play();
    recorder.expect_changes(&[StateChange::Playing(true), StateChange::ResetVisible(true)]);

    count.changed().await.expect("count change");
    recorder.expect_changes(&[StateChange::Count(1)]);

    controller.on_play();
    recorder.expect_changes(&[StateChange::Playing(false)]);

    controller.on_reset();
    recorder.expect_changes(&[
        StateChange::Playing(false),
        StateChange::Count(0),
        StateChange::ResetVisible(false),
    ]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_the_active_task() {
    let (store, controller) = test_controller();
    let mut count = store.watch_count();

    controller.on_play();
    count.changed().await.expect("count change");

    controller.shutdown().await.expect("shutdown");
    assert!(!controller.is_running());
    assert!(!store.is_playing());
    assert_eq!(store.count(), 1);

    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert_eq!(store.count(), 1);

    // the task slot is empty again, so reset reverts to a no-op
    controller.on_reset();
    assert_eq!(store.count(), 1);
    assert!(store.is_reset_visible());
}
