//! A three-table "21" match engine with optional `no_std` support.
//!
//! A player faces a scripted opponent at three tables at once. Each round the
//! player shares a small hit budget across the tables, the opponent plays the
//! tables the player stood on, and the round goes to whoever takes two
//! tables. From the second round, a handful of cards become special: a hand
//! holding one cannot bust. The match ends when the deck can no longer cover
//! a deal.
//!
//! [`MatchState`] is the whole match as a plain value with checked
//! transitions; [`Game`] wraps it for shared use with presentation pauses.
//!
//! # Example
//!
//! ```
//! use triple21::{DealOutcome, MatchOptions, MatchState, Phase, ThresholdPolicy};
//!
//! let mut state = MatchState::new(MatchOptions::default(), 42);
//! let policy = ThresholdPolicy::default();
//!
//! while let DealOutcome::Started { .. } = state.deal_next_round().unwrap() {
//!     for id in 1..=3 {
//!         let _ = state.stand(id);
//!     }
//!     if state.phase() == Phase::Opponent {
//!         state.play_opponent_turns(&policy).unwrap();
//!     }
//! }
//!
//! assert_eq!(state.phase(), Phase::GameOver);
//! assert!(state.audit_cards().is_sound());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod history;
pub mod leaderboard;
pub mod options;
pub mod pacing;
pub mod policy;
pub mod result;
pub mod special;
pub mod table;
mod sync;

// Re-export main types
pub use card::{Card, CardKey, DECK_SIZE, Suit};
pub use deck::{HandStats, score_hand};
pub use error::{ActionError, DealError, LeaderboardError, OpponentError};
pub use game::{
    CARDS_PER_ROUND, CardAudit, DealOutcome, DeckStatus, Game, MatchState, OpponentStep, Phase,
};
pub use hand::Hand;
pub use history::{Actor, HistoryAction, HistoryEntry, HistoryEvent, HistoryLog};
#[cfg(feature = "http")]
pub use leaderboard::JsonBinLeaderboard;
pub use leaderboard::{LeaderboardEntry, LeaderboardGateway, MemoryLeaderboard};
pub use options::MatchOptions;
#[cfg(feature = "std")]
pub use pacing::SleepPacer;
pub use pacing::{NoPacing, Pacer, Pause};
pub use policy::{Decision, DecisionContext, OpponentPolicy, ThresholdPolicy};
pub use result::{
    MatchSummary, MatchWinner, RoundResult, RoundScore, RoundWinner, TableResult, WinStreak,
};
pub use table::{TABLE_COUNT, TableState, TableStatus};
