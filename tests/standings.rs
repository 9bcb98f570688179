//! Standings: score application, tiebreak recomputation, ordering.

use tournament_engine::{
    apply_round_results, compare_standings, ranked_standings, Game, GameStatus, Phase, PhaseKind,
    Team, TournamentError,
};

fn teams(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("T{i}"), i as u32))
        .collect()
}

fn finished(phase: &Phase, round: u32, seq: u64, winner: &Team, loser: &Team) -> Game {
    let mut g = Game::new(phase.id, round, seq, winner.id, loser.id);
    g.status = GameStatus::Finished;
    g.winner = Some(winner.id);
    g.loser = Some(loser.id);
    g.score = Some((3, 1));
    g
}

fn drawn(phase: &Phase, round: u32, seq: u64, a: &Team, b: &Team) -> Game {
    let mut g = Game::new(phase.id, round, seq, a.id, b.id);
    g.status = GameStatus::Finished;
    g.score = Some((2, 2));
    g
}

#[test]
fn round_results_credit_scores_and_opponents() {
    let mut pool = teams(4);
    let phase = Phase::new("Swiss", PhaseKind::Swiss, 0, 3);
    let games = vec![
        finished(&phase, 1, 0, &pool[0], &pool[1]),
        drawn(&phase, 1, 1, &pool[2], &pool[3]),
    ];
    apply_round_results(&mut pool, &games).unwrap();

    assert_eq!(pool[0].score, 2);
    assert_eq!(pool[1].score, 0);
    assert_eq!(pool[2].score, 1);
    assert_eq!(pool[3].score, 1);
    for t in &pool {
        assert_eq!(t.games_played, 1);
        assert_eq!(t.opponents.len(), 1);
    }
    assert!(pool[0].has_faced(pool[1].id));
    assert!(pool[3].has_faced(pool[2].id));
}

#[test]
fn unfinished_game_rejects_the_whole_round() {
    let mut pool = teams(2);
    let phase = Phase::new("Swiss", PhaseKind::Swiss, 0, 3);
    let open = Game::new(phase.id, 1, 0, pool[0].id, pool[1].id);
    assert!(matches!(
        apply_round_results(&mut pool, &[open]),
        Err(TournamentError::RoundIncomplete { round: 1 })
    ));
    assert_eq!(pool[0].score, 0);
    assert!(pool[0].opponents.is_empty());
}

#[test]
fn tiebreak_sums_current_scores_of_all_faced_opponents() {
    let mut pool = teams(4);
    let phase = Phase::new("Swiss", PhaseKind::Swiss, 0, 3);
    let (a, b, c, d) = (
        pool[0].clone(),
        pool[1].clone(),
        pool[2].clone(),
        pool[3].clone(),
    );

    // Round 1: a beats b, c beats d. Round 2: c beats a, b beats d.
    apply_round_results(
        &mut pool,
        &[finished(&phase, 1, 0, &a, &b), finished(&phase, 1, 1, &c, &d)],
    )
    .unwrap();
    apply_round_results(
        &mut pool,
        &[finished(&phase, 2, 2, &c, &a), finished(&phase, 2, 3, &b, &d)],
    )
    .unwrap();

    let score = |id| pool.iter().find(|t| t.id == id).unwrap().score;
    let tiebreak = |id| pool.iter().find(|t| t.id == id).unwrap().tiebreak;
    assert_eq!(score(c.id), 4);
    assert_eq!(score(a.id), 2);
    assert_eq!(score(b.id), 2);
    assert_eq!(score(d.id), 0);
    // Tiebreaks reflect the opponents' current scores, not their scores at
    // the time of the game.
    assert_eq!(tiebreak(a.id), 2 + 4); // faced b and c
    assert_eq!(tiebreak(b.id), 2 + 0); // faced a and d
    assert_eq!(tiebreak(c.id), 0 + 2); // faced d and a
    assert_eq!(tiebreak(d.id), 4 + 2); // faced c and b

    // Score first, then tiebreak: a outranks b on tiebreak despite the tie.
    let table = ranked_standings(&pool);
    let order: Vec<u32> = table.iter().map(|t| t.seed).collect();
    assert_eq!(order, vec![3, 1, 2, 4]);
}

#[test]
fn ordering_falls_back_to_seed_last() {
    let mut x = Team::new("X", 5);
    let mut y = Team::new("Y", 2);
    x.score = 4;
    y.score = 4;
    x.tiebreak = 6;
    y.tiebreak = 6;
    // Identical records: the lower seed ranks first.
    assert_eq!(compare_standings(&y, &x), std::cmp::Ordering::Less);
    x.tiebreak = 8;
    assert_eq!(compare_standings(&x, &y), std::cmp::Ordering::Less);
    y.score = 6;
    assert_eq!(compare_standings(&y, &x), std::cmp::Ordering::Less);
}
