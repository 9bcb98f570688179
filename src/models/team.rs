//! Team: seeding, score, tiebreak, and opponent history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Half-points credited for a win. Scores are kept in half-points so every
/// standings comparison stays an integer comparison.
pub const WIN_SCORE: u32 = 2;
/// Half-points credited to each side of a recognized draw.
pub const DRAW_SCORE: u32 = 1;

/// A competing team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Initial seed, 1 = strongest. Final tie-break in the standings order.
    pub seed: u32,
    /// Accumulated score in half-points (win = 2, draw = 1).
    pub score: u32,
    /// Buchholz tiebreak in half-points: sum of the current scores of all
    /// opponents faced so far.
    pub tiebreak: u32,
    /// Opponents faced so far, in order. Byes do not appear here.
    pub opponents: Vec<TeamId>,
    pub games_played: u32,
    /// Byes received (a bye is an automatic win without an opponent).
    pub byes: u32,
    /// Set when the team wins its qualifying game in a two-stage format.
    pub qualified: bool,
}

impl Team {
    /// Create a team with the given name and seed. Counters start at zero.
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seed,
            score: 0,
            tiebreak: 0,
            opponents: Vec::new(),
            games_played: 0,
            byes: 0,
            qualified: false,
        }
    }

    /// Score on the conventional scale (win = 1, draw = 0.5).
    pub fn points(&self) -> f64 {
        f64::from(self.score) / 2.0
    }

    /// Tiebreak on the conventional scale.
    pub fn tiebreak_points(&self) -> f64 {
        f64::from(self.tiebreak) / 2.0
    }

    /// Record a won game against `opponent`.
    pub fn credit_win(&mut self, opponent: TeamId) {
        self.score += WIN_SCORE;
        self.record_opponent(opponent);
    }

    /// Record a drawn game against `opponent`.
    pub fn credit_draw(&mut self, opponent: TeamId) {
        self.score += DRAW_SCORE;
        self.record_opponent(opponent);
    }

    /// Record a lost game against `opponent`.
    pub fn credit_loss(&mut self, opponent: TeamId) {
        self.record_opponent(opponent);
    }

    /// Credit a bye: an automatic win with no opponent entry and no tiebreak
    /// contribution.
    pub fn credit_bye(&mut self) {
        self.score += WIN_SCORE;
        self.byes += 1;
    }

    /// Whether this team has already faced `opponent`.
    pub fn has_faced(&self, opponent: TeamId) -> bool {
        self.opponents.contains(&opponent)
    }

    fn record_opponent(&mut self, opponent: TeamId) {
        self.opponents.push(opponent);
        self.games_played += 1;
    }
}
