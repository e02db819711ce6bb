//! Console front-end for the tickcount counter.
//!
//! Plays the role of the presentation layer: subscribes to the store's
//! change feed, renders every change as a JSON line, and drives the
//! controller through a scripted play / pause / resume / auto-stop / reset
//! session.

use std::sync::Arc;
use std::time::Duration;

use tickcount_core::CounterStore;
use tickcount_runtime::{ControllerConfig, CounterController};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tick interval for the demo session; short so the full cycle plays out in
/// a few seconds instead of the production default of one tick per second.
const DEMO_TICK: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickcount=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== tickcount: reactive counter demo ===\n");

    let store = Arc::new(CounterStore::new());
    let controller = CounterController::with_config(
        Arc::clone(&store),
        ControllerConfig::default().with_tick_interval(DEMO_TICK),
    );

    // Presentation side: render every state change as a JSON line. The loop
    // ends on its own once the store (and with it the change feed) is
    // dropped at the bottom of main.
    let mut changes = store.changes();
    let renderer = tokio::spawn(async move {
        while let Ok(change) = changes.recv().await {
            match serde_json::to_string(&change) {
                Ok(line) => println!("  {line}"),
                Err(error) => tracing::warn!(%error, "failed to render change"),
            }
        }
    });

    println!(">>> play");
    controller.on_play();
    tokio::time::sleep(DEMO_TICK * 3 + DEMO_TICK / 2).await;

    println!(">>> play (pause at {})", store.count());
    controller.on_play();
    tokio::time::sleep(DEMO_TICK * 2).await;

    println!(">>> play (resume)");
    controller.on_play();

    // wait for the auto-stop at the bound
    let mut playing = store.watch_playing();
    while *playing.borrow_and_update() {
        if playing.changed().await.is_err() {
            break;
        }
    }
    println!(">>> auto-stopped at {}", store.count());

    println!(">>> reset");
    controller.on_reset();

    if let Err(error) = controller.shutdown().await {
        tracing::error!(%error, "shutdown failed");
    }

    let final_state = store.snapshot();
    println!("\nfinal state: {final_state:?}");

    drop(controller);
    drop(store);
    if let Err(error) = renderer.await {
        tracing::error!(%error, "renderer task failed");
    }
}
