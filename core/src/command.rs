//! Commands accepted by the controller.

use serde::{Deserialize, Serialize};

/// The complete external command vocabulary
///
/// The presentation layer drives the system with exactly these two commands;
/// everything else (ticks, auto-stop) happens internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Toggle between running and paused
    Play,
    /// Stop the task and clear the counter (no-op before the first play)
    Reset,
}

impl Command {
    /// Stable lowercase name, used as a metrics label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Reset => "reset",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
