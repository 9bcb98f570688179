//! Game: one pairing of two teams within a phase round.

use crate::models::field::FieldId;
use crate::models::phase::PhaseId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// Lifecycle of a game. `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created; waiting for a team slot and/or a free field.
    #[default]
    Waiting,
    /// Both teams known and a field assigned.
    Scheduled,
    /// Result recorded.
    Finished,
}

/// A single game. Team slots are `Option` because bracket games are created
/// before both participants are known.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub phase: PhaseId,
    pub round: u32,
    /// Global creation order; drives slot-filling and field handoff order.
    pub seq: u64,
    pub team1: Option<TeamId>,
    pub team2: Option<TeamId>,
    /// Field this game is (or was last) played on.
    pub field: Option<FieldId>,
    pub status: GameStatus,
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,
    /// Submitted score (team1, team2).
    pub score: Option<(u32, u32)>,
}

impl Game {
    /// Create a waiting game with both teams known.
    pub fn new(phase: PhaseId, round: u32, seq: u64, team1: TeamId, team2: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase,
            round,
            seq,
            team1: Some(team1),
            team2: Some(team2),
            field: None,
            status: GameStatus::Waiting,
            winner: None,
            loser: None,
            score: None,
        }
    }

    /// Create a waiting game with only the first slot filled (bracket
    /// slot-filling creates games on demand).
    pub fn with_first_slot(phase: PhaseId, round: u32, seq: u64, team: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase,
            round,
            seq,
            team1: Some(team),
            team2: None,
            field: None,
            status: GameStatus::Waiting,
            winner: None,
            loser: None,
            score: None,
        }
    }

    /// A team slot is still empty and the game is not finished.
    pub fn has_open_slot(&self) -> bool {
        self.status != GameStatus::Finished && (self.team1.is_none() || self.team2.is_none())
    }

    /// Fill the first empty slot (team1 before team2). Returns false if both
    /// slots are already taken.
    pub fn fill_slot(&mut self, team: TeamId) -> bool {
        if self.team1.is_none() {
            self.team1 = Some(team);
            true
        } else if self.team2.is_none() {
            self.team2 = Some(team);
            true
        } else {
            false
        }
    }

    /// Both team slots filled and the game not yet finished.
    pub fn is_ready(&self) -> bool {
        self.status != GameStatus::Finished && self.team1.is_some() && self.team2.is_some()
    }

    /// Whether `team` occupies one of the slots.
    pub fn involves(&self, team: TeamId) -> bool {
        self.team1 == Some(team) || self.team2 == Some(team)
    }
}
