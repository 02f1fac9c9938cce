//! Presentation delays.
//!
//! The engine never sleeps on its own. [`crate::Game`] asks a [`Pacer`] to
//! pause at two points: after a deal and before each opponent decision.

#[cfg(feature = "std")]
use core::time::Duration;

#[cfg(feature = "std")]
use crate::options::MatchOptions;

/// A point where the game pauses for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Between shuffling and revealing a new round's hands.
    Deal,
    /// Before an opponent decision.
    Think,
}

/// Performs presentation pauses.
pub trait Pacer {
    /// Blocks for the given pause.
    fn pause(&self, pause: Pause);
}

/// Returns immediately. Used by tests and headless simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&self, _pause: Pause) {}
}

/// Sleeps the calling thread for the configured durations.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepPacer {
    deal: Duration,
    think: Duration,
}

#[cfg(feature = "std")]
impl SleepPacer {
    /// Uses the delays from `options`.
    #[must_use]
    pub const fn from_options(options: &MatchOptions) -> Self {
        Self {
            deal: options.deal_delay,
            think: options.think_delay,
        }
    }

    /// Returns the duration slept for `pause`.
    #[must_use]
    pub const fn duration(&self, pause: Pause) -> Duration {
        match pause {
            Pause::Deal => self.deal,
            Pause::Think => self.think,
        }
    }
}

#[cfg(feature = "std")]
impl Pacer for SleepPacer {
    fn pause(&self, pause: Pause) {
        let duration = self.duration(pause);
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
