//! Engine logic: standings, pairing, bracket routing, field scheduling,
//! round coordination, and tournament construction.

mod bracket;
mod fields;
mod pairing;
mod rounds;
mod setup;
mod standings;

pub use bracket::{route_game, slot_team, RouteTarget, SlotOutcome};
pub use fields::{assign_field_if_available, reassign_freed_field};
pub use pairing::{pair_round, RoundPairings};
pub use rounds::{
    handle_round_completion, record_result, round_state, start_tournament, GameResult, RoundState,
};
pub use setup::{build_tournament, Format};
pub use standings::{
    apply_round_results, compare_standings, ranked_standings, recompute_tiebreaks,
};
