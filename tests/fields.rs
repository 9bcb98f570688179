//! Field scheduling: lowest-free assignment, handoff, and the
//! one-unfinished-game-per-field invariant.

use std::collections::HashMap;
use tournament_engine::{
    build_tournament, reassign_freed_field, record_result, start_tournament, Format, GameStatus,
    Tournament, TournamentConfig,
};

fn swiss_tournament(team_count: usize, field_count: u32) -> Tournament {
    let names = (1..=team_count).map(|i| format!("T{i}")).collect();
    let mut t = build_tournament(
        "Fields",
        names,
        field_count,
        Format::Swiss { rounds: 5 },
        TournamentConfig::default(),
    )
    .unwrap();
    start_tournament(&mut t).unwrap();
    t
}

fn assert_field_invariant(t: &Tournament) {
    let mut open_per_field: HashMap<_, u32> = HashMap::new();
    for g in t.games.iter().filter(|g| g.status != GameStatus::Finished) {
        if let Some(field) = g.field {
            *open_per_field.entry(field).or_default() += 1;
        }
    }
    for (field, count) in open_per_field {
        assert_eq!(count, 1, "field {} hosts more than one open game", field);
    }
}

#[test]
fn round_start_schedules_only_as_many_games_as_fields() {
    // Nine games, five fields: the first five (by sequence) get fields 1-5,
    // the other four wait.
    let t = swiss_tournament(18, 5);
    let scheduled: Vec<_> = t
        .games
        .iter()
        .filter(|g| g.status == GameStatus::Scheduled)
        .collect();
    let waiting: Vec<_> = t
        .games
        .iter()
        .filter(|g| g.status == GameStatus::Waiting)
        .collect();
    assert_eq!(scheduled.len(), 5);
    assert_eq!(waiting.len(), 4);
    assert!(scheduled.iter().all(|g| g.field.is_some()));
    assert!(waiting.iter().all(|g| g.field.is_none()));
    // Sequence order maps onto field number order.
    let numbers: Vec<u32> = scheduled
        .iter()
        .map(|g| {
            let field = g.field.unwrap();
            t.fields.iter().find(|f| f.id == field).unwrap().number
        })
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_field_invariant(&t);
}

#[test]
fn finished_game_hands_its_field_to_the_next_waiting_game() {
    let mut t = swiss_tournament(18, 5);
    let second = t.games[1].clone();
    let sixth = t.games[5].id;
    assert_eq!(t.games[5].status, GameStatus::Waiting);

    record_result(&mut t, second.id, (4, 2)).unwrap();

    let handed = t.game(sixth).unwrap();
    assert_eq!(handed.status, GameStatus::Scheduled);
    assert_eq!(handed.field, second.field);
    assert_field_invariant(&t);
}

#[test]
fn fields_stay_single_booked_through_a_full_round() {
    let mut t = swiss_tournament(18, 5);
    // Finish every game of round 1 in creation order; each submission frees
    // a field and may hand it on.
    let round_one: Vec<_> = t.games.iter().map(|g| g.id).collect();
    for (i, game_id) in round_one.into_iter().enumerate() {
        record_result(&mut t, game_id, (5, (i % 4) as u32)).unwrap();
        assert_field_invariant(&t);
    }
    // Round 2 exists and is scheduled onto free fields again.
    let phase = t.phases[0].id;
    assert!(t.round_exists(phase, 2));
    let scheduled = t
        .games
        .iter()
        .filter(|g| g.round == 2 && g.status == GameStatus::Scheduled)
        .count();
    assert_eq!(scheduled, 5);
    assert_field_invariant(&t);
}

#[test]
fn busy_fields_are_not_reassigned() {
    let mut t = swiss_tournament(6, 1);
    let first = t.games[0].clone();
    assert_eq!(first.status, GameStatus::Scheduled);

    // The only field still hosts an open game; a stray handoff leaves it
    // alone instead of double-booking it.
    assert_eq!(reassign_freed_field(&mut t, first.field.unwrap()), None);
    assert_eq!(t.game(first.id).unwrap().status, GameStatus::Scheduled);
    assert!(t.games[1..].iter().all(|g| g.field.is_none()));
    assert_field_invariant(&t);
}

#[test]
fn inactive_fields_are_skipped() {
    let names = (1..=8).map(|i| format!("T{i}")).collect();
    let mut t = build_tournament(
        "Inactive",
        names,
        3,
        Format::Swiss { rounds: 3 },
        TournamentConfig::default(),
    )
    .unwrap();
    t.fields[0].active = false;
    start_tournament(&mut t).unwrap();

    let scheduled: Vec<_> = t
        .games
        .iter()
        .filter(|g| g.status == GameStatus::Scheduled)
        .collect();
    assert_eq!(scheduled.len(), 2);
    let skipped = t.fields[0].id;
    assert!(scheduled.iter().all(|g| g.field != Some(skipped)));
    assert_field_invariant(&t);
}
