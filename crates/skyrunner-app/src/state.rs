//! Messages and settings shared between the driver and the game loop thread.

use skyrunner_core::commands::InputEvent;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// An input event to forward to the simulation engine.
    Input(InputEvent),
    /// Run one tick. Only meaningful under [`Pacing::Unpaced`].
    Advance,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// How the game loop schedules ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Fixed 60 Hz against the wall clock.
    #[default]
    Realtime,
    /// One tick per [`GameLoopCommand::Advance`], as fast as the driver
    /// asks. Runs are reproducible because input and ticks interleave
    /// exactly as sent.
    Unpaced,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing_is_realtime() {
        assert_eq!(Pacing::default(), Pacing::Realtime);
    }
}
