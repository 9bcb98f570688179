//! Standings: score application and tiebreak recomputation.

use crate::models::{Game, GameStatus, Team, TeamId, TournamentError};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Apply a finished round to the standings.
///
/// 1. Verify every game is finished (no partial application).
/// 2. Credit scores: win = 2 half-points, draw = 1 each, loss = 0.
/// 3. Append each game's opponents to both teams' histories.
/// 4. Recompute every team's tiebreak from the updated scores.
pub fn apply_round_results(teams: &mut [Team], games: &[Game]) -> Result<(), TournamentError> {
    for g in games {
        if g.status != GameStatus::Finished {
            return Err(TournamentError::RoundIncomplete { round: g.round });
        }
    }

    for g in games {
        let (t1, t2) = match (g.team1, g.team2) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(TournamentError::GameNotReady(g.id)),
        };
        match g.winner {
            Some(w) => {
                let (winner, loser) = if w == t1 { (t1, t2) } else { (t2, t1) };
                team_mut(teams, winner)?.credit_win(loser);
                team_mut(teams, loser)?.credit_loss(winner);
            }
            // Finished without a winner: a recognized draw.
            None => {
                team_mut(teams, t1)?.credit_draw(t2);
                team_mut(teams, t2)?.credit_draw(t1);
            }
        }
    }

    recompute_tiebreaks(teams);
    Ok(())
}

/// Recompute every team's Buchholz tiebreak: the sum of the current scores
/// of all opponents faced so far. Two passes, so the result does not depend
/// on team order.
pub fn recompute_tiebreaks(teams: &mut [Team]) {
    let scores: HashMap<TeamId, u32> = teams.iter().map(|t| (t.id, t.score)).collect();
    for team in teams.iter_mut() {
        team.tiebreak = team
            .opponents
            .iter()
            .map(|o| scores.get(o).copied().unwrap_or(0))
            .sum();
    }
}

/// The standings ordering used everywhere: score descending, then tiebreak
/// descending, then initial seed ascending.
pub fn compare_standings(a: &Team, b: &Team) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.tiebreak.cmp(&a.tiebreak))
        .then_with(|| a.seed.cmp(&b.seed))
}

/// Standings snapshot: teams sorted best to worst.
pub fn ranked_standings(teams: &[Team]) -> Vec<Team> {
    let mut out = teams.to_vec();
    out.sort_by(compare_standings);
    out
}

fn team_mut(teams: &mut [Team], id: TeamId) -> Result<&mut Team, TournamentError> {
    teams
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TournamentError::TeamNotFound(id))
}
