//! Command line simulator: build a tournament, feed it random results, print
//! the final standings.
//! Run with: cargo run --bin simulate
//! Override with env: TEAMS (default 16), FIELDS (default 4), FORMAT
//! (swiss | two_stage, default swiss), ROUNDS (Swiss rounds, default 5),
//! SEED (default 42).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tournament_engine::{build_tournament, Engine, Format, GameStatus, TournamentConfig};

fn env_or(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let teams = env_or("TEAMS", 16) as usize;
    let fields = env_or("FIELDS", 4);
    let rounds = env_or("ROUNDS", 5);
    let seed = u64::from(env_or("SEED", 42));
    let format = match std::env::var("FORMAT").as_deref() {
        Ok("two_stage") => Format::TwoStage,
        _ => Format::Swiss { rounds },
    };
    log::info!(
        "simulating {:?} with {} teams on {} fields (seed {})",
        format,
        teams,
        fields,
        seed
    );

    let names: Vec<String> = (1..=teams).map(|i| format!("Team {:03}", i)).collect();
    let tournament = build_tournament(
        "Simulated Open",
        names,
        fields,
        format,
        TournamentConfig::default(),
    )?;

    let engine = Engine::new();
    let id = engine.insert(tournament)?;
    engine.start(id, "simulator")?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = 0u32;
    loop {
        let schedule = engine.schedule(id)?;
        let next = schedule
            .iter()
            .find(|g| g.status == GameStatus::Scheduled)
            .map(|g| g.id);
        let game_id = match next {
            Some(g) => g,
            None => break,
        };
        let a: u32 = rng.gen_range(0..10);
        let b: u32 = rng.gen_range(0..10);
        // The default config rejects ties; nudge them apart.
        let b = if b == a { a + 1 } else { b };
        let result = engine.submit_result(id, game_id, (a, b), "simulator")?;
        played += 1;
        if let Some(round) = result.generated_round {
            log::info!("round {} generated after {} game(s)", round, played);
        }
    }

    let snapshot = engine.snapshot(id)?;
    log::info!(
        "simulation done: {} game(s) played, all finished: {}",
        played,
        snapshot.all_games_finished()
    );

    println!("=== Final standings: {} ===", snapshot.name);
    for (rank, team) in engine.standings(id)?.iter().enumerate() {
        println!(
            "{:>3}. {:<10} {:>5.1} pts  (tiebreak {:.1}, seed {}{})",
            rank + 1,
            team.name,
            team.points(),
            team.tiebreak_points(),
            team.seed,
            if team.qualified { ", qualified" } else { "" }
        );
    }
    Ok(())
}
