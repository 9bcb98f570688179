//! Swiss pairing: fold order, byes, and rematch avoidance.

use std::collections::HashMap;
use tournament_engine::{
    apply_round_results, pair_round, Game, GameStatus, Phase, PhaseKind, Team, TeamId,
    TournamentError,
};

fn teams(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("T{i}"), i as u32))
        .collect()
}

fn seed_of(teams: &[Team]) -> HashMap<TeamId, u32> {
    teams.iter().map(|t| (t.id, t.seed)).collect()
}

/// Pairs mapped to (seed, seed) for readable assertions.
fn seed_pairs(pairs: &[(TeamId, TeamId)], seeds: &HashMap<TeamId, u32>) -> Vec<(u32, u32)> {
    pairs.iter().map(|(a, b)| (seeds[a], seeds[b])).collect()
}

/// Record a finished game between two teams directly on the pool.
fn played(pool: &mut [Team], winner_seed: u32, loser_seed: u32) {
    let winner_id = pool.iter().find(|t| t.seed == winner_seed).unwrap().id;
    let loser_id = pool.iter().find(|t| t.seed == loser_seed).unwrap().id;
    pool.iter_mut()
        .find(|t| t.id == winner_id)
        .unwrap()
        .credit_win(loser_id);
    pool.iter_mut()
        .find(|t| t.id == loser_id)
        .unwrap()
        .credit_loss(winner_id);
}

#[test]
fn pool_of_one_is_too_small() {
    let pool = teams(1);
    assert!(matches!(
        pair_round(&pool),
        Err(TournamentError::PoolTooSmall { available: 1 })
    ));
}

#[test]
fn first_round_folds_top_half_against_bottom() {
    let pool = teams(8);
    let seeds = seed_of(&pool);
    let pairings = pair_round(&pool).unwrap();
    assert!(pairings.bye.is_none());
    assert_eq!(pairings.forced_rematches, 0);
    assert_eq!(
        seed_pairs(&pairings.pairs, &seeds),
        vec![(1, 5), (2, 6), (3, 7), (4, 8)]
    );
}

#[test]
fn every_team_appears_exactly_once() {
    let pool = teams(9);
    let pairings = pair_round(&pool).unwrap();
    let mut seen: Vec<TeamId> = pairings
        .pairs
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .collect();
    seen.extend(pairings.bye);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 9);
}

#[test]
fn odd_pool_gives_bye_to_lowest_ranked() {
    let pool = teams(7);
    let seeds = seed_of(&pool);
    let pairings = pair_round(&pool).unwrap();
    let bye = pairings.bye.unwrap();
    assert_eq!(seeds[&bye], 7);
    assert_eq!(
        seed_pairs(&pairings.pairs, &seeds),
        vec![(1, 4), (2, 5), (3, 6)]
    );
}

#[test]
fn bye_skips_teams_that_already_had_one() {
    let mut pool = teams(7);
    pool[6].byes = 1; // seed 7 already sat out
    let seeds = seed_of(&pool);
    let pairings = pair_round(&pool).unwrap();
    assert_eq!(seeds[&pairings.bye.unwrap()], 6);
}

#[test]
fn rematch_repaired_by_nearest_swap() {
    let mut pool = teams(4);
    let seeds = seed_of(&pool);
    // Everyone on equal score; seeds 1 and 3 have already met, so the plain
    // fold (1,3),(2,4) needs a swap.
    played(&mut pool, 1, 3);
    for t in pool.iter_mut() {
        t.score = 2;
        t.tiebreak = 0;
    }
    let pairings = pair_round(&pool).unwrap();
    assert_eq!(pairings.forced_rematches, 0);
    assert_eq!(seed_pairs(&pairings.pairs, &seeds), vec![(1, 4), (2, 3)]);
}

#[test]
fn unavoidable_rematch_is_accepted_and_counted() {
    let mut pool = teams(2);
    played(&mut pool, 1, 2);
    pool[1].score = pool[0].score; // keep them in one group
    let pairings = pair_round(&pool).unwrap();
    assert_eq!(pairings.pairs.len(), 1);
    assert_eq!(pairings.forced_rematches, 1);
}

#[test]
fn conflict_floats_into_next_group_when_no_swap_helps() {
    let mut pool = teams(4);
    let seeds = seed_of(&pool);
    // Seeds 1 and 2 form the top score group but have already met; seeds 3
    // and 4 sit below. The top group cannot be fixed internally, so both of
    // its members float down and pair against the lower group.
    played(&mut pool, 1, 2);
    pool.iter_mut().find(|t| t.seed == 2).unwrap().score = 2;
    let pairings = pair_round(&pool).unwrap();
    assert_eq!(pairings.forced_rematches, 0);
    assert_eq!(seed_pairs(&pairings.pairs, &seeds), vec![(1, 3), (2, 4)]);
}

#[test]
fn second_round_regroups_by_score_without_rematches() {
    // Eight seeds, first-round fold (1,5),(2,6),(3,7),(4,8) with upsets:
    // 5 beats 1, 2 beats 6, 3 beats 7, 8 beats 4.
    let mut pool = teams(8);
    let seeds = seed_of(&pool);
    let phase = Phase::new("Swiss", PhaseKind::Swiss, 0, 3);
    let results = [(5, 1), (2, 6), (3, 7), (8, 4)];
    let mut games = Vec::new();
    for (i, &(winner, loser)) in results.iter().enumerate() {
        let w = pool.iter().find(|t| t.seed == winner).unwrap().id;
        let l = pool.iter().find(|t| t.seed == loser).unwrap().id;
        let mut g = Game::new(phase.id, 1, i as u64, w, l);
        g.status = GameStatus::Finished;
        g.winner = Some(w);
        g.loser = Some(l);
        g.score = Some((3, 1));
        games.push(g);
    }
    apply_round_results(&mut pool, &games).unwrap();

    // Winners hold two half-points with zero tiebreak (their victims have
    // not scored); within each score group the fold runs by seed.
    let pairings = pair_round(&pool).unwrap();
    assert_eq!(pairings.forced_rematches, 0);
    assert_eq!(
        seed_pairs(&pairings.pairs, &seeds),
        vec![(2, 5), (3, 8), (1, 6), (4, 7)]
    );
    for (a, b) in &pairings.pairs {
        let team_a = pool.iter().find(|t| t.id == *a).unwrap();
        assert!(!team_a.has_faced(*b));
    }
}
