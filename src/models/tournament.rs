//! Tournament aggregate and TournamentError.

use crate::models::field::{Field, FieldId};
use crate::models::game::{Game, GameId, GameStatus};
use crate::models::phase::{Phase, PhaseId};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// No tournament with this id.
    TournamentNotFound(TournamentId),
    /// No phase with this id in the tournament.
    PhaseNotFound(PhaseId),
    /// No game with this id in the tournament.
    GameNotFound(GameId),
    /// No team with this id in the tournament.
    TeamNotFound(TeamId),
    /// The game already has a recorded result.
    GameAlreadyFinished(GameId),
    /// The game does not have both team slots filled yet.
    GameNotReady(GameId),
    /// A tied score was submitted where no draw credit is defined.
    TieNotAllowed,
    /// Too few teams for the requested pairing or format.
    PoolTooSmall { available: usize },
    /// The round still has unfinished games.
    RoundIncomplete { round: u32 },
    /// The entry round has already been generated.
    AlreadyStarted,
    /// The entry phase of a tournament must be a Swiss phase.
    NotSwissEntry,
    /// A lock guarding tournament state was poisoned by a panicking writer.
    LockPoisoned,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::PhaseNotFound(_) => write!(f, "Phase not found"),
            TournamentError::GameNotFound(_) => write!(f, "Game not found"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::GameAlreadyFinished(_) => write!(f, "Game already has a result"),
            TournamentError::GameNotReady(_) => write!(f, "Game does not have both teams yet"),
            TournamentError::TieNotAllowed => write!(f, "Tied scores are not allowed here"),
            TournamentError::PoolTooSmall { available } => {
                write!(f, "Need at least 2 teams to pair (have {})", available)
            }
            TournamentError::RoundIncomplete { round } => {
                write!(f, "Round {} still has unfinished games", round)
            }
            TournamentError::AlreadyStarted => write!(f, "Tournament has already started"),
            TournamentError::NotSwissEntry => write!(f, "The first phase must be a Swiss phase"),
            TournamentError::LockPoisoned => write!(f, "Tournament state lock was poisoned"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Per-tournament behaviour switches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// When true, a tied score in a non-qualifying Swiss game credits both
    /// teams half a win. Bracket and qualifying games can never draw.
    pub draws_allowed: bool,
}

/// One played pairing, appended when a game's result reaches the standings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub round: u32,
}

/// A bye credited at round generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ByeRecord {
    pub phase: PhaseId,
    pub round: u32,
    pub team: TeamId,
}

/// Full tournament state: teams, phases, fields, games, and bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub config: TournamentConfig,
    /// Phases sorted by `order`; the first is the entry phase.
    pub phases: Vec<Phase>,
    pub teams: Vec<Team>,
    /// Fields sorted by `number`.
    pub fields: Vec<Field>,
    /// Every game ever created, in creation (`seq`) order.
    pub games: Vec<Game>,
    /// Append-only rematch history.
    pub pair_history: Vec<PairRecord>,
    /// Byes credited so far.
    pub byes_given: Vec<ByeRecord>,
    /// (phase, round) pairs whose standings have been applied.
    pub scored_rounds: HashSet<(PhaseId, u32)>,
    seq_counter: u64,
}

impl Tournament {
    /// Create a tournament from its parts. Phases and fields are sorted into
    /// processing order.
    pub fn new(
        name: impl Into<String>,
        config: TournamentConfig,
        mut phases: Vec<Phase>,
        teams: Vec<Team>,
        mut fields: Vec<Field>,
    ) -> Self {
        phases.sort_by_key(|p| p.order);
        fields.sort_by_key(|f| f.number);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            config,
            phases,
            teams,
            fields,
            games: Vec::new(),
            pair_history: Vec::new(),
            byes_given: Vec::new(),
            scored_rounds: HashSet::new(),
            seq_counter: 0,
        }
    }

    /// The entry phase (lowest `order`).
    pub fn entry_phase(&self) -> Option<&Phase> {
        self.phases.first()
    }

    pub fn phase(&self, id: PhaseId) -> Result<&Phase, TournamentError> {
        self.phases
            .iter()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PhaseNotFound(id))
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, TournamentError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(TournamentError::TeamNotFound(id))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Result<&mut Team, TournamentError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::TeamNotFound(id))
    }

    pub fn game(&self, id: GameId) -> Result<&Game, TournamentError> {
        self.games
            .iter()
            .find(|g| g.id == id)
            .ok_or(TournamentError::GameNotFound(id))
    }

    pub fn game_mut(&mut self, id: GameId) -> Result<&mut Game, TournamentError> {
        self.games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(TournamentError::GameNotFound(id))
    }

    /// Games of one round of one phase, in `seq` order.
    pub fn games_in_round(&self, phase: PhaseId, round: u32) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| g.phase == phase && g.round == round)
            .collect()
    }

    /// Whether any game exists for (phase, round).
    pub fn round_exists(&self, phase: PhaseId, round: u32) -> bool {
        self.games
            .iter()
            .any(|g| g.phase == phase && g.round == round)
    }

    /// Every game of (phase, round) finished. False when the round has no
    /// games at all.
    pub fn round_complete(&self, phase: PhaseId, round: u32) -> bool {
        let mut any = false;
        for g in self
            .games
            .iter()
            .filter(|g| g.phase == phase && g.round == round)
        {
            any = true;
            if g.status != GameStatus::Finished {
                return false;
            }
        }
        any
    }

    /// Append a played pairing to the rematch history.
    pub fn record_pair(&mut self, a: TeamId, b: TeamId, round: u32) {
        self.pair_history.push(PairRecord {
            team_a: a,
            team_b: b,
            round,
        });
    }

    /// Next global game sequence number.
    pub fn next_seq(&mut self) -> u64 {
        let seq = self.seq_counter;
        self.seq_counter += 1;
        seq
    }

    /// No unfinished games anywhere.
    pub fn all_games_finished(&self) -> bool {
        self.games.iter().all(|g| g.status == GameStatus::Finished)
    }

    /// Fields currently referenced by a non-finished game.
    pub fn busy_fields(&self) -> HashSet<FieldId> {
        self.games
            .iter()
            .filter(|g| g.status != GameStatus::Finished)
            .filter_map(|g| g.field)
            .collect()
    }
}
