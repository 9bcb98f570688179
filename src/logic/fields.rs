//! Field scheduling: lowest free field to the next ready game.

use crate::models::{FieldId, GameId, GameStatus, Tournament, TournamentError};

/// Assign the lowest-numbered free active field to the game, moving it from
/// `Waiting` to `Scheduled`. With every field busy the game simply stays
/// waiting; running out of fields is not an error.
pub fn assign_field_if_available(
    tournament: &mut Tournament,
    game_id: GameId,
) -> Result<Option<FieldId>, TournamentError> {
    let game = tournament.game(game_id)?;
    if !game.is_ready() || game.field.is_some() {
        return Ok(None);
    }

    let busy = tournament.busy_fields();
    let free = tournament
        .fields
        .iter()
        .filter(|f| f.active && !busy.contains(&f.id))
        .min_by_key(|f| f.number)
        .map(|f| f.id);

    match free {
        Some(field) => {
            let game = tournament.game_mut(game_id)?;
            game.field = Some(field);
            game.status = GameStatus::Scheduled;
            Ok(Some(field))
        }
        None => {
            log::debug!("no free field, game {} stays waiting", game_id);
            Ok(None)
        }
    }
}

/// Hand the field freed by a finished game to the lowest-sequence waiting
/// game that has both teams. Inactive fields, and fields already bound to
/// an open game again, are left alone. Returns the game that received the
/// field.
pub fn reassign_freed_field(tournament: &mut Tournament, field: FieldId) -> Option<GameId> {
    if !tournament.fields.iter().any(|f| f.id == field && f.active) {
        return None;
    }
    if tournament.busy_fields().contains(&field) {
        return None;
    }
    let next = tournament
        .games
        .iter()
        .filter(|g| g.status == GameStatus::Waiting && g.is_ready())
        .min_by_key(|g| g.seq)
        .map(|g| g.id)?;
    if let Ok(game) = tournament.game_mut(next) {
        game.field = Some(field);
        game.status = GameStatus::Scheduled;
        log::debug!("freed field handed to game {}", next);
    }
    Some(next)
}
