//! Match configuration options.

use core::time::Duration;

/// Configuration options for a match.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use triple21::MatchOptions;
///
/// let options = MatchOptions::default()
///     .with_max_hits_per_turn(3)
///     .with_think_delay(Duration::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    /// Hits the player may take per turn, summed over all tables.
    pub max_hits_per_turn: u8,
    /// Round at whose start the special cards are marked.
    pub special_round: u32,
    /// Number of cards marked special.
    pub special_count: usize,
    /// Total at which the opponent stands without a special card.
    pub opponent_stands_on: u8,
    /// Pause before dealt hands become actionable.
    pub deal_delay: Duration,
    /// Pause before each opponent decision.
    pub think_delay: Duration,
    /// Entries kept on the leaderboard.
    pub leaderboard_size: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_hits_per_turn: 2,
            special_round: 2,
            special_count: 5,
            opponent_stands_on: 17,
            deal_delay: Duration::from_millis(500),
            think_delay: Duration::from_millis(750),
            leaderboard_size: 10,
        }
    }
}

impl MatchOptions {
    /// Sets the per-turn hit budget.
    ///
    /// # Example
    ///
    /// ```
    /// use triple21::MatchOptions;
    ///
    /// let options = MatchOptions::default().with_max_hits_per_turn(1);
    /// assert_eq!(options.max_hits_per_turn, 1);
    /// ```
    #[must_use]
    pub const fn with_max_hits_per_turn(mut self, hits: u8) -> Self {
        self.max_hits_per_turn = hits;
        self
    }

    /// Sets the round that activates the special cards.
    ///
    /// # Example
    ///
    /// ```
    /// use triple21::MatchOptions;
    ///
    /// let options = MatchOptions::default().with_special_round(3);
    /// assert_eq!(options.special_round, 3);
    /// ```
    #[must_use]
    pub const fn with_special_round(mut self, round: u32) -> Self {
        self.special_round = round;
        self
    }

    /// Sets how many cards are marked special.
    #[must_use]
    pub const fn with_special_count(mut self, count: usize) -> Self {
        self.special_count = count;
        self
    }

    /// Sets the opponent's standing total.
    ///
    /// # Example
    ///
    /// ```
    /// use triple21::MatchOptions;
    ///
    /// let options = MatchOptions::default().with_opponent_stands_on(18);
    /// assert_eq!(options.opponent_stands_on, 18);
    /// ```
    #[must_use]
    pub const fn with_opponent_stands_on(mut self, total: u8) -> Self {
        self.opponent_stands_on = total;
        self
    }

    /// Sets the pause after dealing.
    #[must_use]
    pub const fn with_deal_delay(mut self, delay: Duration) -> Self {
        self.deal_delay = delay;
        self
    }

    /// Sets the pause before each opponent decision.
    #[must_use]
    pub const fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }

    /// Sets the leaderboard length.
    ///
    /// # Example
    ///
    /// ```
    /// use triple21::MatchOptions;
    ///
    /// let options = MatchOptions::default().with_leaderboard_size(5);
    /// assert_eq!(options.leaderboard_size, 5);
    /// ```
    #[must_use]
    pub const fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }
}
