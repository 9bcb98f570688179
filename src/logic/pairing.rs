//! Swiss pairing: score groups, fold pairing, rematch avoidance.

use crate::logic::standings;
use crate::models::{Team, TeamId, TournamentError};

/// Pairings for one Swiss round, in the order games should be created.
#[derive(Clone, Debug, Default)]
pub struct RoundPairings {
    /// (higher-ranked, lower-ranked) per pairing, in scheduling order.
    pub pairs: Vec<(TeamId, TeamId)>,
    /// Team receiving the bye, if the pool was odd.
    pub bye: Option<TeamId>,
    /// Rematches that could not be avoided.
    pub forced_rematches: u32,
}

/// Generate the pairings for the next Swiss round from the given pool. Each
/// team carries its own opponent history, so the pool is the only input.
///
/// 1. Sort by score desc, tiebreak desc, seed asc.
/// 2. Odd pool: the lowest-ranked team with the fewest byes sits out.
/// 3. Split into contiguous equal-score groups, processed top-down. Teams
///    floated from the group above join at the top; a group left odd floats
///    its lowest-ranked member down.
/// 4. Fold each group: rank i of the top half against rank i of the bottom
///    half.
/// 5. A rematch is repaired by the nearest swap of opponents between
///    pairings; failing that, one team floats to the group below and the
///    group is re-folded. In the last group the fold stands and its
///    rematches are counted as forced.
/// 6. The output order (group by group, fold order within) is the order
///    games get their sequence numbers.
pub fn pair_round(pool: &[Team]) -> Result<RoundPairings, TournamentError> {
    if pool.len() < 2 {
        return Err(TournamentError::PoolTooSmall {
            available: pool.len(),
        });
    }

    let mut order: Vec<&Team> = pool.iter().collect();
    order.sort_by(|a, b| standings::compare_standings(a, b));

    let mut result = RoundPairings::default();

    if order.len() % 2 == 1 {
        let min_byes = order.iter().map(|t| t.byes).min().unwrap_or(0);
        let idx = order
            .iter()
            .rposition(|t| t.byes == min_byes)
            .unwrap_or(order.len() - 1);
        result.bye = Some(order[idx].id);
        order.remove(idx);
    }

    let mut groups: Vec<Vec<&Team>> = Vec::new();
    for team in order {
        if let Some(group) = groups.last_mut() {
            if group[0].score == team.score {
                group.push(team);
                continue;
            }
        }
        groups.push(vec![team]);
    }

    let last = groups.len() - 1;
    let mut carry: Vec<&Team> = Vec::new();
    for (gi, group) in groups.into_iter().enumerate() {
        let mut members = std::mem::take(&mut carry);
        members.extend(group);

        if members.len() % 2 == 1 && gi != last {
            if let Some(down) = members.pop() {
                carry.push(down);
            }
        }

        let (pairs, conflicts) = fold_and_repair(&members);
        if conflicts.is_empty() || gi == last {
            if !conflicts.is_empty() {
                log::warn!(
                    "swiss pairing: {} unavoidable rematch(es) in the final score group",
                    conflicts.len()
                );
                result.forced_rematches += conflicts.len() as u32;
            }
            result.pairs.extend(pairs);
        } else {
            // Float the bottom team of the first unresolved pairing, plus the
            // group's lowest-ranked member to keep the group even.
            let float_id = pairs[conflicts[0]].1;
            if let Some(pos) = members.iter().position(|t| t.id == float_id) {
                carry.push(members.remove(pos));
            }
            if let Some(down) = members.pop() {
                carry.push(down);
            }
            let (pairs, conflicts) = fold_and_repair(&members);
            if !conflicts.is_empty() {
                log::warn!(
                    "swiss pairing: {} rematch(es) left after floating",
                    conflicts.len()
                );
                result.forced_rematches += conflicts.len() as u32;
            }
            result.pairs.extend(pairs);
        }

        carry.sort_by(|a, b| standings::compare_standings(a, b));
    }

    Ok(result)
}

/// Fold `members` into pairs (rank i against rank h+i) and repair rematches
/// by the nearest valid swap of opponents between pairings. Returns the pairs
/// plus the indices of pairings still containing a rematch.
fn fold_and_repair(members: &[&Team]) -> (Vec<(TeamId, TeamId)>, Vec<usize>) {
    debug_assert_eq!(members.len() % 2, 0);
    let h = members.len() / 2;
    let top = &members[..h];
    let mut bottom: Vec<&Team> = members[h..].to_vec();

    for i in 0..h {
        if !top[i].has_faced(bottom[i].id) {
            continue;
        }
        'search: for d in 1..h {
            let candidates = [i.checked_add(d).filter(|&j| j < h), i.checked_sub(d)];
            for j in candidates.into_iter().flatten() {
                if !top[i].has_faced(bottom[j].id) && !top[j].has_faced(bottom[i].id) {
                    bottom.swap(i, j);
                    break 'search;
                }
            }
        }
    }

    let mut pairs = Vec::with_capacity(h);
    let mut conflicts = Vec::new();
    for i in 0..h {
        if top[i].has_faced(bottom[i].id) {
            conflicts.push(i);
        }
        pairs.push((top[i].id, bottom[i].id));
    }
    (pairs, conflicts)
}
