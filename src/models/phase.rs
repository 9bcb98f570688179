//! Phase: one stage of a tournament and its routing edges.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a phase.
pub type PhaseId = Uuid;

/// Pairing discipline of a phase.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Pairings generated from the standings each round.
    Swiss,
    /// Single-elimination bracket.
    MainBracket,
    /// Winners side of a double-elimination bracket.
    WinnerBracket,
    /// Losers side of a double-elimination bracket, or a consolation bracket.
    LoserBracket,
}

/// One stage of a tournament. `winner_to` / `loser_to` form the static phase
/// graph: `Some(own id)` advances within the phase, `Some(other)` crosses
/// into another phase, `None` means elimination for a loser and the title for
/// a winner leaving the end of its phase.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub name: String,
    pub kind: PhaseKind,
    /// Processing order; the phase with the lowest order is the entry phase.
    pub order: u32,
    /// Number of rounds this phase runs.
    pub rounds: u32,
    pub winner_to: Option<PhaseId>,
    pub loser_to: Option<PhaseId>,
}

impl Phase {
    pub fn new(name: impl Into<String>, kind: PhaseKind, order: u32, rounds: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            order,
            rounds,
            winner_to: None,
            loser_to: None,
        }
    }

    /// A Swiss phase that routes winners or losers into another phase is a
    /// qualifying phase; its rounds are numbered from 0.
    pub fn is_qualifying(&self) -> bool {
        self.kind == PhaseKind::Swiss
            && (self.winner_to.is_some_and(|p| p != self.id)
                || self.loser_to.is_some_and(|p| p != self.id))
    }

    /// First round number of this phase (0 for a qualifying phase, 1 otherwise).
    pub fn first_round(&self) -> u32 {
        if self.is_qualifying() {
            0
        } else {
            1
        }
    }

    /// Last round number of this phase.
    pub fn last_round(&self) -> u32 {
        self.first_round() + self.rounds.saturating_sub(1)
    }

    /// True for bracket-structured phases (teams advance game by game).
    pub fn is_bracket(&self) -> bool {
        matches!(
            self.kind,
            PhaseKind::MainBracket | PhaseKind::WinnerBracket | PhaseKind::LoserBracket
        )
    }
}
