//! Engine: tournament registry, per-tournament critical sections, and the
//! inbound operation surface.

use crate::audit::{AuditRecorder, AuditSink, LogSink};
use crate::logic::{ranked_standings, record_result, start_tournament, GameResult};
use crate::models::{
    Game, GameId, PhaseId, Team, TeamId, Tournament, TournamentError, TournamentId,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

/// Shared engine state: many tournaments by id, each behind its own mutex so
/// the transitions of one tournament serialize while different tournaments
/// proceed independently. The outer map lock is held only to fetch a handle.
pub struct Engine {
    tournaments: RwLock<HashMap<TournamentId, Arc<Mutex<Tournament>>>>,
    audit: AuditRecorder,
}

impl Engine {
    /// Engine with audit lines going to the log.
    pub fn new() -> Self {
        Self::with_sink(Box::new(LogSink))
    }

    /// Engine with a custom audit sink.
    pub fn with_sink(sink: Box<dyn AuditSink>) -> Self {
        Self {
            tournaments: RwLock::new(HashMap::new()),
            audit: AuditRecorder::spawn(sink),
        }
    }

    /// Register a tournament. Returns its id.
    pub fn insert(&self, tournament: Tournament) -> Result<TournamentId, TournamentError> {
        let id = tournament.id;
        let mut guard = self
            .tournaments
            .write()
            .map_err(|_| TournamentError::LockPoisoned)?;
        guard.insert(id, Arc::new(Mutex::new(tournament)));
        log::info!("tournament {} registered", id);
        Ok(id)
    }

    /// Generate the entry round. Returns its round number.
    pub fn start(&self, id: TournamentId, actor: &str) -> Result<u32, TournamentError> {
        let handle = self.tournament(id)?;
        let mut t = handle.lock().map_err(|_| TournamentError::LockPoisoned)?;
        let round = start_tournament(&mut t)?;
        self.audit.record(
            actor,
            "tournament_started",
            format!("tournament {}", id),
            None,
            Some(serde_json::json!({ "round": round })),
        );
        Ok(round)
    }

    /// Record a final score for a game. The whole transition sequence
    /// (finish, field handoff, routing, round completion) runs under the
    /// tournament's lock as one unit.
    pub fn submit_result(
        &self,
        id: TournamentId,
        game_id: GameId,
        score: (u32, u32),
        actor: &str,
    ) -> Result<GameResult, TournamentError> {
        let handle = self.tournament(id)?;
        let mut t = handle.lock().map_err(|_| TournamentError::LockPoisoned)?;
        let before = t
            .game(game_id)
            .ok()
            .and_then(|g| serde_json::to_value(g).ok());
        let result = record_result(&mut t, game_id, score)?;
        let after = t
            .game(game_id)
            .ok()
            .and_then(|g| serde_json::to_value(g).ok());
        self.audit.record(
            actor,
            "result_recorded",
            format!("game {}", game_id),
            before,
            after,
        );
        Ok(result)
    }

    /// Current standings across the whole tournament, best first.
    pub fn standings(&self, id: TournamentId) -> Result<Vec<Team>, TournamentError> {
        let handle = self.tournament(id)?;
        let t = handle.lock().map_err(|_| TournamentError::LockPoisoned)?;
        Ok(ranked_standings(&t.teams))
    }

    /// Standings restricted to one phase: the teams that were paired,
    /// slotted, or given a bye there, ranked by the same order.
    pub fn phase_standings(
        &self,
        id: TournamentId,
        phase_id: PhaseId,
    ) -> Result<Vec<Team>, TournamentError> {
        let handle = self.tournament(id)?;
        let t = handle.lock().map_err(|_| TournamentError::LockPoisoned)?;
        t.phase(phase_id)?;
        let mut present: HashSet<TeamId> = HashSet::new();
        for game in t.games.iter().filter(|g| g.phase == phase_id) {
            present.extend([game.team1, game.team2].into_iter().flatten());
        }
        present.extend(
            t.byes_given
                .iter()
                .filter(|b| b.phase == phase_id)
                .map(|b| b.team),
        );
        let teams: Vec<Team> = t
            .teams
            .iter()
            .filter(|team| present.contains(&team.id))
            .cloned()
            .collect();
        Ok(ranked_standings(&teams))
    }

    /// All games in creation order with their current status and field.
    pub fn schedule(&self, id: TournamentId) -> Result<Vec<Game>, TournamentError> {
        let handle = self.tournament(id)?;
        let t = handle.lock().map_err(|_| TournamentError::LockPoisoned)?;
        Ok(t.games.clone())
    }

    /// Full state snapshot, for display or handing to a persistence layer.
    pub fn snapshot(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let handle = self.tournament(id)?;
        let t = handle.lock().map_err(|_| TournamentError::LockPoisoned)?;
        Ok(t.clone())
    }

    fn tournament(&self, id: TournamentId) -> Result<Arc<Mutex<Tournament>>, TournamentError> {
        let guard = self
            .tournaments
            .read()
            .map_err(|_| TournamentError::LockPoisoned)?;
        guard
            .get(&id)
            .cloned()
            .ok_or(TournamentError::TournamentNotFound(id))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
