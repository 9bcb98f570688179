//! Tournament engine: Swiss pairing, bracket progression, and field
//! scheduling for large multi-phase tournaments.

pub mod audit;
pub mod engine;
pub mod logic;
pub mod models;

pub use audit::{AuditEntry, AuditRecorder, AuditSink, LogSink, MemorySink};
pub use engine::Engine;
pub use logic::{
    apply_round_results, assign_field_if_available, build_tournament, compare_standings,
    handle_round_completion, pair_round, ranked_standings, reassign_freed_field, record_result,
    recompute_tiebreaks, round_state, route_game, slot_team, start_tournament, Format, GameResult,
    RoundPairings, RoundState, RouteTarget, SlotOutcome,
};
pub use models::{
    ByeRecord, Field, FieldId, Game, GameId, GameStatus, PairRecord, Phase, PhaseId, PhaseKind,
    Team, TeamId, Tournament, TournamentConfig, TournamentError, TournamentId, DRAW_SCORE,
    WIN_SCORE,
};
