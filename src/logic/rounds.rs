//! Round coordination: result recording, round completion, next-round
//! generation, and two-stage qualification.

use crate::logic::bracket::{self, RouteTarget};
use crate::logic::{fields, pairing, standings};
use crate::models::{
    ByeRecord, Game, GameId, GameStatus, Phase, PhaseId, PhaseKind, TeamId, Tournament,
    TournamentError,
};

/// Observable position of a round in its lifecycle. Rounds with no games yet
/// read as `Open`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundState {
    /// At least one game is unfinished (or the round has not been created).
    Open,
    /// All games finished; standings not yet applied.
    Complete,
    /// Standings applied; the successor round does not exist yet.
    StandingsUpdated,
    /// Standings applied and the successor round's games exist.
    NextRoundGenerated,
    /// Standings applied and the phase has nothing further to generate.
    PhaseComplete,
}

/// Outcome of recording one game result.
#[derive(Clone, Debug)]
pub struct GameResult {
    pub game: GameId,
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,
    pub draw: bool,
    /// The game's round finished with this result.
    pub round_complete: bool,
    /// Swiss round generated as a consequence of this result.
    pub generated_round: Option<u32>,
}

/// Generate the entry phase's first round. The entry phase must be Swiss;
/// brackets are entered through routing, not direct seeding.
pub fn start_tournament(tournament: &mut Tournament) -> Result<u32, TournamentError> {
    let entry = tournament
        .entry_phase()
        .cloned()
        .ok_or(TournamentError::NotSwissEntry)?;
    if entry.kind != PhaseKind::Swiss {
        return Err(TournamentError::NotSwissEntry);
    }
    let round = entry.first_round();
    if tournament.round_exists(entry.id, round) {
        return Err(TournamentError::AlreadyStarted);
    }
    generate_swiss_round(tournament, entry.id, round)?;
    log::info!("tournament {} started at round {}", tournament.name, round);
    Ok(round)
}

/// Record a final score for a game and run every transition that follows
/// from it: finish the game, route bracket teams, handle Swiss round
/// completion, and hand the freed field to the next waiting game. Call with
/// the tournament's lock held.
pub fn record_result(
    tournament: &mut Tournament,
    game_id: GameId,
    score: (u32, u32),
) -> Result<GameResult, TournamentError> {
    let game = tournament.game(game_id)?.clone();
    if game.status == GameStatus::Finished {
        return Err(TournamentError::GameAlreadyFinished(game_id));
    }
    let (t1, t2) = match (game.team1, game.team2) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(TournamentError::GameNotReady(game_id)),
    };
    let phase = tournament.phase(game.phase)?.clone();

    let draw = score.0 == score.1;
    let draws_ok = phase.kind == PhaseKind::Swiss
        && !phase.is_qualifying()
        && tournament.config.draws_allowed;
    if draw && !draws_ok {
        return Err(TournamentError::TieNotAllowed);
    }
    let (winner, loser) = if draw {
        (None, None)
    } else if score.0 > score.1 {
        (Some(t1), Some(t2))
    } else {
        (Some(t2), Some(t1))
    };

    {
        let g = tournament.game_mut(game_id)?;
        g.status = GameStatus::Finished;
        g.winner = winner;
        g.loser = loser;
        g.score = Some(score);
    }
    log::info!(
        "game {} finished {}-{} (phase {} round {})",
        game_id,
        score.0,
        score.1,
        phase.name,
        game.round
    );

    // Bracket games feed the standings and route onward one by one; Swiss
    // rounds are settled in bulk once the whole round is in.
    if phase.is_bracket() {
        if let (Some(w), Some(l)) = (winner, loser) {
            tournament.team_mut(w)?.credit_win(l);
            tournament.team_mut(l)?.credit_loss(w);
            standings::recompute_tiebreaks(&mut tournament.teams);
            tournament.record_pair(w, l, game.round);
            route_finished_game(tournament, &phase, &game, w, l)?;
        }
    }

    let round_complete = tournament.round_complete(game.phase, game.round);
    let mut generated_round = None;
    if round_complete && phase.kind == PhaseKind::Swiss {
        generated_round = handle_round_completion(tournament, game.phase, game.round)?;
    }

    // The freed field is handed on after routing and generation, which may
    // already have claimed it for a newly ready game.
    if let Some(field) = game.field {
        fields::reassign_freed_field(tournament, field);
    }

    Ok(GameResult {
        game: game_id,
        winner,
        loser,
        draw,
        round_complete,
        generated_round,
    })
}

/// Handle a completed Swiss round: apply standings exactly once, then either
/// route qualification (qualifying phases), generate the next round, or
/// declare the phase complete. Bracket rounds are credited and routed game
/// by game as results arrive, so their completion leaves nothing to do.
///
/// Idempotent: the standings application is guarded by the scored-rounds
/// marker and generation by the successor round's existence, so a repeated
/// invocation is a no-op.
pub fn handle_round_completion(
    tournament: &mut Tournament,
    phase_id: PhaseId,
    round: u32,
) -> Result<Option<u32>, TournamentError> {
    if !tournament.round_complete(phase_id, round) {
        return Err(TournamentError::RoundIncomplete { round });
    }
    let phase = tournament.phase(phase_id)?.clone();
    if phase.is_bracket() {
        return Ok(None);
    }

    if !tournament.scored_rounds.contains(&(phase_id, round)) {
        let round_games: Vec<Game> = tournament
            .games_in_round(phase_id, round)
            .into_iter()
            .cloned()
            .collect();
        standings::apply_round_results(&mut tournament.teams, &round_games)?;
        for g in &round_games {
            if let (Some(a), Some(b)) = (g.team1, g.team2) {
                tournament.record_pair(a, b, round);
            }
        }
        tournament.scored_rounds.insert((phase_id, round));
        log::info!("phase {} round {}: standings applied", phase.name, round);
    }

    if phase.is_qualifying() {
        route_qualifiers(tournament, &phase, round)?;
        return Ok(None);
    }

    let next = round + 1;
    if next > phase.last_round() {
        log::info!("phase {} complete after round {}", phase.name, round);
        return Ok(None);
    }
    if tournament.round_exists(phase_id, next) {
        return Ok(None);
    }
    generate_swiss_round(tournament, phase_id, next)?;
    Ok(Some(next))
}

/// Where (phase, round) sits in its lifecycle.
pub fn round_state(
    tournament: &Tournament,
    phase_id: PhaseId,
    round: u32,
) -> Result<RoundState, TournamentError> {
    let phase = tournament.phase(phase_id)?;
    if !tournament.round_complete(phase_id, round) {
        return Ok(RoundState::Open);
    }
    if phase.kind == PhaseKind::Swiss && !tournament.scored_rounds.contains(&(phase_id, round)) {
        return Ok(RoundState::Complete);
    }
    if round >= phase.last_round() && phase.winner_to.map_or(true, |dest| dest == phase.id) {
        return Ok(RoundState::PhaseComplete);
    }
    let (next_phase, next_round) = match phase.winner_to {
        Some(dest) if dest != phase.id => (dest, round + 1),
        _ => (phase_id, round + 1),
    };
    if tournament.round_exists(next_phase, next_round) {
        return Ok(RoundState::NextRoundGenerated);
    }
    Ok(RoundState::StandingsUpdated)
}

/// Pair and create the games of one Swiss round, credit the bye, and assign
/// fields in sequence order.
fn generate_swiss_round(
    tournament: &mut Tournament,
    phase_id: PhaseId,
    round: u32,
) -> Result<(), TournamentError> {
    let pairings = pairing::pair_round(&tournament.teams)?;

    if let Some(bye_team) = pairings.bye {
        tournament.team_mut(bye_team)?.credit_bye();
        tournament.byes_given.push(ByeRecord {
            phase: phase_id,
            round,
            team: bye_team,
        });
        log::info!("round {}: bye credited to team {}", round, bye_team);
    }

    let mut created = Vec::with_capacity(pairings.pairs.len());
    for &(a, b) in &pairings.pairs {
        let seq = tournament.next_seq();
        let game = Game::new(phase_id, round, seq, a, b);
        created.push(game.id);
        tournament.games.push(game);
    }
    for game_id in &created {
        fields::assign_field_if_available(tournament, *game_id)?;
    }
    log::info!(
        "round {}: {} game(s) generated, {} forced rematch(es)",
        round,
        created.len(),
        pairings.forced_rematches
    );
    Ok(())
}

/// Route every qualifying game's winner into the winner destination and
/// loser into the loser destination, flagging winners as qualified. Teams
/// that received the qualifying bye count as winners. Runs once: a second
/// invocation finds a destination round populated and returns.
fn route_qualifiers(
    tournament: &mut Tournament,
    phase: &Phase,
    round: u32,
) -> Result<(), TournamentError> {
    let routed = [phase.winner_to, phase.loser_to]
        .into_iter()
        .flatten()
        .filter(|dest| *dest != phase.id)
        .any(|dest| tournament.round_exists(dest, round + 1));
    if routed {
        return Ok(());
    }

    let games: Vec<Game> = tournament
        .games_in_round(phase.id, round)
        .into_iter()
        .cloned()
        .collect();
    let mut qualified = 0;
    for g in &games {
        let (w, l) = match (g.winner, g.loser) {
            (Some(w), Some(l)) => (w, l),
            _ => continue,
        };
        tournament.team_mut(w)?.qualified = true;
        qualified += 1;
        route_finished_game(tournament, phase, g, w, l)?;
    }

    let byes: Vec<TeamId> = tournament
        .byes_given
        .iter()
        .filter(|b| b.phase == phase.id && b.round == round)
        .map(|b| b.team)
        .collect();
    for team in byes {
        tournament.team_mut(team)?.qualified = true;
        qualified += 1;
        if let Some(dest) = phase.winner_to {
            let outcome = bracket::slot_team(tournament, dest, round + 1, team);
            if outcome.ready {
                fields::assign_field_if_available(tournament, outcome.game)?;
            }
        }
    }

    log::info!(
        "qualifying round complete: {} team(s) advance to the main stage",
        qualified
    );
    Ok(())
}

/// Send a finished game's winner and loser to their routing targets.
fn route_finished_game(
    tournament: &mut Tournament,
    phase: &Phase,
    game: &Game,
    winner: TeamId,
    loser: TeamId,
) -> Result<(), TournamentError> {
    let (winner_target, loser_target) = bracket::route_game(game, phase);
    place(tournament, winner, winner_target)?;
    place(tournament, loser, loser_target)?;
    Ok(())
}

/// Apply one routing target: slot the team (and schedule the game if it
/// became ready), or log the terminal outcome.
fn place(
    tournament: &mut Tournament,
    team: TeamId,
    target: RouteTarget,
) -> Result<(), TournamentError> {
    match target {
        RouteTarget::Slot { phase, round } => {
            let outcome = bracket::slot_team(tournament, phase, round, team);
            if outcome.ready {
                fields::assign_field_if_available(tournament, outcome.game)?;
            }
        }
        RouteTarget::Champion => log::info!("team {} has won its bracket", team),
        RouteTarget::Eliminated => log::info!("team {} is out of the bracket", team),
    }
    Ok(())
}
