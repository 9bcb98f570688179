//! Tournament construction: formats and their phase graphs.

use crate::models::{
    Field, Phase, PhaseKind, Team, Tournament, TournamentConfig, TournamentError,
};

/// Supported tournament formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    /// One Swiss phase of the given number of rounds.
    Swiss { rounds: u32 },
    /// One qualifying round; winners enter a knockout bracket, losers a
    /// consolation bracket.
    TwoStage,
}

/// Build a tournament: teams seeded 1..=n in the given order, numbered
/// fields, and the phase graph for the format. Custom phase graphs (full
/// double elimination and the like) can be assembled directly from `Phase`
/// values instead.
pub fn build_tournament(
    name: impl Into<String>,
    team_names: Vec<String>,
    field_count: u32,
    format: Format,
    config: TournamentConfig,
) -> Result<Tournament, TournamentError> {
    let minimum = match format {
        Format::Swiss { .. } => 2,
        // Each side of a two-stage event needs a pair to play.
        Format::TwoStage => 4,
    };
    if team_names.len() < minimum {
        return Err(TournamentError::PoolTooSmall {
            available: team_names.len(),
        });
    }

    let teams: Vec<Team> = team_names
        .into_iter()
        .enumerate()
        .map(|(i, team_name)| Team::new(team_name, i as u32 + 1))
        .collect();
    let fields: Vec<Field> = (1..=field_count).map(Field::new).collect();
    let phases = match format {
        Format::Swiss { rounds } => {
            vec![Phase::new("Swiss", PhaseKind::Swiss, 0, rounds.max(1))]
        }
        Format::TwoStage => two_stage_phases(teams.len()),
    };
    Ok(Tournament::new(name, config, phases, teams, fields))
}

/// Qualifying round feeding a main knockout for the winners and a
/// consolation knockout ("Hobby Cup") for the rest.
fn two_stage_phases(team_count: usize) -> Vec<Phase> {
    let half = (team_count / 2).max(1);
    let rounds = bracket_rounds(half);

    let mut qualifying = Phase::new("Qualifying", PhaseKind::Swiss, 0, 1);
    let mut main = Phase::new("Main Bracket", PhaseKind::MainBracket, 1, rounds);
    let mut consolation = Phase::new("Hobby Cup", PhaseKind::LoserBracket, 2, rounds);

    main.winner_to = Some(main.id);
    consolation.winner_to = Some(consolation.id);
    qualifying.winner_to = Some(main.id);
    qualifying.loser_to = Some(consolation.id);

    vec![qualifying, main, consolation]
}

/// Rounds a knockout needs for `entrants` teams (ceil log2, at least 1).
fn bracket_rounds(entrants: usize) -> u32 {
    let mut rounds = 1;
    let mut capacity = 2usize;
    while capacity < entrants {
        capacity *= 2;
        rounds += 1;
    }
    rounds
}
