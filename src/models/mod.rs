//! Data structures: teams, games, phases, fields, and the tournament aggregate.

mod field;
mod game;
mod phase;
mod team;
mod tournament;

pub use field::{Field, FieldId};
pub use game::{Game, GameId, GameStatus};
pub use phase::{Phase, PhaseId, PhaseKind};
pub use team::{Team, TeamId, DRAW_SCORE, WIN_SCORE};
pub use tournament::{
    ByeRecord, PairRecord, Tournament, TournamentConfig, TournamentError, TournamentId,
};
