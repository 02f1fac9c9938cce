//! Round and match result types.

extern crate alloc;

use alloc::vec::Vec;

use serde::Serialize;

use crate::table::TableStatus;

/// Who took a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoundWinner {
    /// The player holds at least two favourable tables.
    Player,
    /// The opponent holds at least two favourable tables.
    Opponent,
    /// Neither side reached two.
    Draw,
}

impl RoundWinner {
    /// Tallies table outcomes into a round winner.
    #[must_use]
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = TableStatus>,
    {
        let (mut player, mut opponent) = (0usize, 0usize);
        for status in outcomes {
            if status.favours_player() {
                player += 1;
            } else if status.favours_opponent() {
                opponent += 1;
            }
        }

        if player >= 2 {
            Self::Player
        } else if opponent >= 2 {
            Self::Opponent
        } else {
            Self::Draw
        }
    }
}

/// Rounds won by each side across the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    /// Rounds won by the player.
    pub player: u32,
    /// Rounds won by the opponent.
    pub opponent: u32,
    /// Drawn rounds.
    pub draws: u32,
}

impl RoundScore {
    /// Counts a finished round.
    pub const fn record(&mut self, winner: RoundWinner) {
        match winner {
            RoundWinner::Player => self.player += 1,
            RoundWinner::Opponent => self.opponent += 1,
            RoundWinner::Draw => self.draws += 1,
        }
    }

    /// Returns the number of rounds played.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.player + self.opponent + self.draws
    }
}

/// Consecutive round wins by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinStreak {
    /// Current run of player round wins.
    pub current: u32,
    /// Longest run this match.
    pub max: u32,
}

impl WinStreak {
    /// Extends the run on a player win, resets it otherwise.
    pub fn record(&mut self, winner: RoundWinner) {
        if winner == RoundWinner::Player {
            self.current += 1;
            self.max = self.max.max(self.current);
        } else {
            self.current = 0;
        }
    }
}

/// Result for a single table after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableResult {
    /// Table id.
    pub table: u8,
    /// Final status.
    pub outcome: TableStatus,
    /// The player's raw score.
    pub player_score: u8,
    /// The opponent's raw score.
    pub opponent_score: u8,
}

/// Result of a scored round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    /// 1-based round number.
    pub round: u32,
    /// Per-table results in table order.
    pub tables: Vec<TableResult>,
    /// Who took the round.
    pub winner: RoundWinner,
    /// Match score after this round.
    pub score: RoundScore,
    /// Streak after this round.
    pub streak: WinStreak,
}

/// Who took the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchWinner {
    /// More player round wins.
    Player,
    /// More opponent round wins.
    Opponent,
    /// Equal round wins.
    Tie,
}

/// Final report of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// Final round tally.
    pub score: RoundScore,
    /// Longest player win streak.
    pub max_streak: u32,
    /// Rounds played.
    pub rounds_played: u32,
    /// Who took the match.
    pub winner: MatchWinner,
}

impl MatchSummary {
    /// Builds the summary from the final tally and streak.
    #[must_use]
    pub fn new(score: RoundScore, streak: WinStreak) -> Self {
        let winner = match score.player.cmp(&score.opponent) {
            core::cmp::Ordering::Greater => MatchWinner::Player,
            core::cmp::Ordering::Less => MatchWinner::Opponent,
            core::cmp::Ordering::Equal => MatchWinner::Tie,
        };

        Self {
            score,
            max_streak: streak.max,
            rounds_played: score.rounds(),
            winner,
        }
    }
}
