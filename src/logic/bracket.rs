//! Bracket routing: phase-graph destinations and lazy slot-filling.
//!
//! Slots are filled in completion order, not by a precomputed seeded
//! bracket: the winner of the first game to finish lands in the first open
//! slot of the destination round. Precomputing seeded slots per round is the
//! alternative when cross-bracket seeding matters.

use crate::models::{Game, GameId, Phase, PhaseId, TeamId, Tournament};

/// Where a finished game's team goes next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteTarget {
    /// Enters (phase, round) via slot-filling.
    Slot { phase: PhaseId, round: u32 },
    /// Won the last round of a phase with no onward edge.
    Champion,
    /// No onward edge for a loser.
    Eliminated,
}

/// Resolve the winner and loser destinations of a finished game from the
/// phase graph. The destination round is `game.round + 1` for same-phase
/// advancement and cross-phase drops alike.
pub fn route_game(game: &Game, phase: &Phase) -> (RouteTarget, RouteTarget) {
    let next_round = game.round + 1;
    let winner = match phase.winner_to {
        Some(dest) if dest == phase.id && next_round > phase.last_round() => RouteTarget::Champion,
        Some(dest) => RouteTarget::Slot {
            phase: dest,
            round: next_round,
        },
        None => RouteTarget::Champion,
    };
    let loser = match phase.loser_to {
        Some(dest) if dest == phase.id && next_round > phase.last_round() => {
            RouteTarget::Eliminated
        }
        Some(dest) => RouteTarget::Slot {
            phase: dest,
            round: next_round,
        },
        None => RouteTarget::Eliminated,
    };
    (winner, loser)
}

/// Result of slotting a team into a destination round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotOutcome {
    pub game: GameId,
    /// Both teams now present; the game can be scheduled.
    pub ready: bool,
    /// A new game was created to hold this team.
    pub created: bool,
}

/// Put `team` into the lowest-sequence waiting game of (phase, round) that
/// still has an empty slot (team1 before team2), or create a new waiting
/// game when no game has room.
pub fn slot_team(
    tournament: &mut Tournament,
    phase: PhaseId,
    round: u32,
    team: TeamId,
) -> SlotOutcome {
    for game in tournament
        .games
        .iter_mut()
        .filter(|g| g.phase == phase && g.round == round)
    {
        if game.has_open_slot() {
            debug_assert!(!game.involves(team));
            game.fill_slot(team);
            return SlotOutcome {
                game: game.id,
                ready: game.is_ready(),
                created: false,
            };
        }
    }
    let seq = tournament.next_seq();
    let game = Game::with_first_slot(phase, round, seq, team);
    let id = game.id;
    tournament.games.push(game);
    SlotOutcome {
        game: id,
        ready: false,
        created: true,
    }
}
