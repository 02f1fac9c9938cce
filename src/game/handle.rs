use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::card::Card;
use crate::error::{ActionError, DealError, OpponentError};
use crate::leaderboard::{self, LeaderboardEntry, LeaderboardGateway};
use crate::options::MatchOptions;
use crate::pacing::{NoPacing, Pacer, Pause};
use crate::policy::{OpponentPolicy, ThresholdPolicy};
use crate::result::RoundResult;
use crate::sync::Mutex;

use super::{DealOutcome, MatchState, OpponentStep, Phase};

/// Shared handle to a match.
///
/// Wraps a [`MatchState`] behind a lock together with the opponent policy and
/// the pacer. Pauses never hold the lock, so a display can read the state
/// while the opponent thinks. A [`reset`](Self::reset) during a pause
/// abandons the deal or opponent turn that was waiting on it.
///
/// # Example
///
/// ```
/// use triple21::{DealOutcome, Game, MatchOptions, Phase};
///
/// let game = Game::new(MatchOptions::default(), 7);
/// let outcome = game.deal_next_round().unwrap();
/// assert_eq!(outcome, DealOutcome::Started { round: 1 });
///
/// let phase = game.with_state(|state| state.phase());
/// assert!(matches!(phase, Phase::Player | Phase::Opponent));
/// ```
pub struct Game {
    state: Mutex<MatchState>,
    policy: Box<dyn OpponentPolicy + Send + Sync>,
    pacer: Box<dyn Pacer + Send + Sync>,
    opponent_running: AtomicBool,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("opponent_running", &self.opponent_running)
            .finish_non_exhaustive()
    }
}

/// Clears the opponent flag on every exit path.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Game {
    /// Creates a match with the threshold opponent and no pauses.
    #[must_use]
    pub fn new(options: MatchOptions, seed: u64) -> Self {
        let policy = ThresholdPolicy::new(options.opponent_stands_on);
        Self {
            state: Mutex::new(MatchState::new(options, seed)),
            policy: Box::new(policy),
            pacer: Box::new(NoPacing),
            opponent_running: AtomicBool::new(false),
        }
    }

    /// Replaces the pacer.
    #[must_use]
    pub fn with_pacer<P>(mut self, pacer: P) -> Self
    where
        P: Pacer + Send + Sync + 'static,
    {
        self.pacer = Box::new(pacer);
        self
    }

    /// Replaces the opponent policy.
    #[must_use]
    pub fn with_policy<P>(mut self, policy: P) -> Self
    where
        P: OpponentPolicy + Send + Sync + 'static,
    {
        self.policy = Box::new(policy);
        self
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> MatchState {
        self.state.lock().clone()
    }

    /// Runs `f` with the state locked.
    pub fn with_state<R>(&self, f: impl FnOnce(&MatchState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Runs `f` with the state locked for writing.
    ///
    /// Useful for rigging a deck between [`MatchState::begin_round`] and
    /// [`MatchState::reveal_round`].
    pub fn with_state_mut<R>(&self, f: impl FnOnce(&mut MatchState) -> R) -> R {
        f(&mut self.state.lock())
    }

    /// Returns whether the opponent phase is being played.
    #[must_use]
    pub fn is_opponent_running(&self) -> bool {
        self.opponent_running.load(Ordering::Acquire)
    }

    /// See [`MatchState::hit`].
    ///
    /// # Errors
    ///
    /// Returns an error if the hit is not allowed.
    pub fn hit(&self, table: u8) -> Result<Card, ActionError> {
        self.state.lock().hit(table)
    }

    /// See [`MatchState::stand`].
    ///
    /// # Errors
    ///
    /// Returns an error if the stand is not allowed.
    pub fn stand(&self, table: u8) -> Result<(), ActionError> {
        self.state.lock().stand(table)
    }

    /// See [`MatchState::set_focus`].
    ///
    /// # Errors
    ///
    /// Returns an error if no table has this id.
    pub fn set_focus(&self, table: u8) -> Result<(), ActionError> {
        self.state.lock().set_focus(table)
    }

    /// See [`MatchState::reset`].
    pub fn reset(&self) {
        self.state.lock().reset();
    }

    /// Deals the next round, pausing between the shuffle and the reveal.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress, the match is over, or the
    /// match was reset during the pause.
    pub fn deal_next_round(&self) -> Result<DealOutcome, DealError> {
        let (outcome, epoch) = {
            let mut state = self.state.lock();
            let outcome = state.begin_round()?;
            (outcome, state.epoch())
        };

        if let DealOutcome::Started { round } = outcome {
            self.pacer.pause(Pause::Deal);

            let mut state = self.state.lock();
            if state.epoch() != epoch {
                tracing::debug!(round, "deal abandoned after reset");
                return Err(DealError::InvalidState);
            }
            state.reveal_round()?;
        }

        Ok(outcome)
    }

    /// Plays the opponent phase with a think pause before every decision,
    /// then scores the round.
    ///
    /// # Errors
    ///
    /// Returns [`OpponentError::AlreadyRunning`] if another call is playing
    /// the phase, or [`OpponentError::InvalidState`] if it is not the
    /// opponent phase or the match was reset during a pause.
    pub fn play_opponent_turns(&self) -> Result<RoundResult, OpponentError> {
        if self
            .opponent_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(OpponentError::AlreadyRunning);
        }
        let _running = RunningGuard(&self.opponent_running);

        let epoch = {
            let state = self.state.lock();
            if state.phase() != Phase::Opponent {
                return Err(OpponentError::InvalidState);
            }
            state.epoch()
        };
        tracing::debug!(epoch, "opponent turn started");

        loop {
            let pending = self.state.lock().pending_opponent_table();
            if let Some(table) = pending {
                tracing::trace!(table, "opponent thinking");
                self.pacer.pause(Pause::Think);
            }

            let mut state = self.state.lock();
            if state.epoch() != epoch {
                tracing::debug!("opponent turn abandoned after reset");
                return Err(OpponentError::InvalidState);
            }
            if let OpponentStep::Resolved(result) = state.opponent_step(&*self.policy)? {
                return Ok(result);
            }
        }
    }

    /// Loads the ranked board for display. Failures read as an empty board.
    pub fn leaderboard<G>(&self, gateway: &G) -> Vec<LeaderboardEntry>
    where
        G: LeaderboardGateway + ?Sized,
    {
        let size = self.state.lock().options().leaderboard_size;
        leaderboard::load_board(gateway, size)
    }

    /// Submits the match's best streak once the match is over.
    ///
    /// Returns `None` while the match is still running; otherwise the board
    /// as best known after the submission. A streak that does not earn a
    /// place is not written.
    pub fn submit_streak<G>(&self, gateway: &G, name: &str) -> Option<Vec<LeaderboardEntry>>
    where
        G: LeaderboardGateway + ?Sized,
    {
        let (summary, size) = {
            let state = self.state.lock();
            (state.summary()?, state.options().leaderboard_size)
        };

        Some(leaderboard::submit_streak(
            gateway,
            name,
            summary.max_streak,
            size,
        ))
    }

    /// Consumes the handle and returns the state.
    #[must_use]
    pub fn into_state(self) -> MatchState {
        self.state.into_inner()
    }
}
