//! Proptest strategies for the domain types.

use proptest::prelude::*;
use tickcount_core::Command;

/// Strategy producing either command
#[must_use]
pub fn command() -> impl Strategy<Value = Command> {
    prop_oneof![Just(Command::Play), Just(Command::Reset)]
}

/// Strategy producing arbitrary command sequences up to `max_len`
#[must_use]
pub fn command_sequence(max_len: usize) -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(command(), 0..max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn sequences_respect_the_length_bound(commands in command_sequence(8)) {
            prop_assert!(commands.len() < 8);
        }
    }
}
