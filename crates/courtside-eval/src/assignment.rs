// Positional role assignment.
//
// Spreads a roster over the five positions with an even per-position slot
// target, preferring single-position players, then the best (fit + bonus)
// placements for players with two positions. The resulting penalty feeds the
// position-balance score.

use std::collections::BTreeMap;
use std::sync::Arc;

use courtside_core::{Player, PlayerId, Position};
use serde::Serialize;

use crate::fit::positional_fit;

/// Roster sizes that never incur a missing-slot penalty.
pub const VALID_ROSTER_SIZES: [usize; 4] = [5, 7, 10, 12];

/// Penalty per unfilled slot for rosters outside `VALID_ROSTER_SIZES`.
const MISSING_SLOT_PENALTY: f64 = 50.0;

/// Penalty per player squeezed out of an option and left unassigned.
const SQUEEZED_OUT_PENALTY: f64 = 20.0;

const PRIMARY_POSITION_BONUS: f64 = 10.0;
const LAST_OPTION_BONUS: f64 = 20.0;

/// Outcome of `assign_positional_roles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionAssignment {
    /// Slots per position: ceil(roster size / 5).
    pub target: usize,
    /// Assigned position per roster index; `None` for unassigned players.
    pub positions: Vec<Option<Position>>,
    /// Players assigned per position.
    pub roles_filled: BTreeMap<Position, usize>,
    pub position_penalty: f64,
    player_ids: Vec<PlayerId>,
}

impl PositionAssignment {
    /// Assigned position of the player at roster index `idx`.
    pub fn position_at(&self, idx: usize) -> Option<Position> {
        self.positions.get(idx).copied().flatten()
    }

    /// Assigned position of the player with `player_id`.
    pub fn position_of(&self, player_id: PlayerId) -> Option<Position> {
        self.player_ids
            .iter()
            .position(|&id| id == player_id)
            .and_then(|idx| self.position_at(idx))
    }

    pub fn filled(&self, position: Position) -> usize {
        self.roles_filled.get(&position).copied().unwrap_or(0)
    }

    pub fn assigned_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    pub fn unassigned_count(&self) -> usize {
        self.positions.len() - self.assigned_count()
    }

    /// Roster indices paired with their assigned position.
    pub fn assigned(&self) -> impl Iterator<Item = (usize, Position)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(idx, pos)| pos.map(|p| (idx, p)))
    }
}

/// A player still waiting for a slot after the single-position pass.
struct Pending {
    idx: usize,
    options: Vec<(Position, f64)>,
    initial_options: usize,
}

/// Assign each roster player to at most one position.
pub fn assign_positional_roles(roster: &[Arc<Player>]) -> PositionAssignment {
    let size = roster.len();
    let target = size.div_ceil(Position::ALL.len());
    let mut positions: Vec<Option<Position>> = vec![None; size];
    let mut filled: BTreeMap<Position, usize> = Position::ALL.iter().map(|&p| (p, 0)).collect();

    let has_room = |filled: &BTreeMap<Position, usize>, pos: Position| {
        filled.get(&pos).copied().unwrap_or(0) < target
    };

    // Pass 1: single-position players go straight to their primary. Walked
    // from the end, so the latest pick wins a contested slot.
    for (idx, player) in roster.iter().enumerate().rev() {
        if player.is_single_position() && has_room(&filled, player.primary_position) {
            positions[idx] = Some(player.primary_position);
            *filled.entry(player.primary_position).or_insert(0) += 1;
        }
    }

    // Pass 2: option sets for everyone else, restricted to open positions.
    let mut pending: Vec<Pending> = roster
        .iter()
        .enumerate()
        .filter(|(idx, _)| positions[*idx].is_none())
        .map(|(idx, player)| {
            let options: Vec<(Position, f64)> = player
                .positions()
                .filter(|&pos| has_room(&filled, pos))
                .map(|pos| (pos, positional_fit(player, pos)))
                .collect();
            Pending {
                idx,
                initial_options: options.len(),
                options,
            }
        })
        .collect();

    // Greedy: take the globally best (player, position) pair until none remain.
    loop {
        let mut best: Option<(usize, Position, f64)> = None;
        for (slot, candidate) in pending.iter().enumerate() {
            let player = &roster[candidate.idx];
            for &(pos, fit) in &candidate.options {
                if !has_room(&filled, pos) {
                    continue;
                }
                let mut adjusted = fit;
                if pos == player.primary_position {
                    adjusted += PRIMARY_POSITION_BONUS;
                }
                if candidate.options.len() == 1 {
                    adjusted += LAST_OPTION_BONUS;
                }
                if best.map_or(true, |(_, _, score)| adjusted > score) {
                    best = Some((slot, pos, adjusted));
                }
            }
        }

        let Some((slot, pos, _)) = best else {
            break;
        };
        let chosen = pending.remove(slot);
        positions[chosen.idx] = Some(pos);
        *filled.entry(pos).or_insert(0) += 1;
        if !has_room(&filled, pos) {
            for candidate in &mut pending {
                candidate.options.retain(|(p, _)| *p != pos);
            }
        }
    }

    let mut penalty = 0.0;
    if !VALID_ROSTER_SIZES.contains(&size) {
        for pos in Position::ALL {
            let missing = target.saturating_sub(filled.get(&pos).copied().unwrap_or(0));
            penalty += missing as f64 * MISSING_SLOT_PENALTY;
        }
    }
    let squeezed = pending
        .iter()
        .filter(|c| c.options.len() < c.initial_options)
        .count();
    penalty += squeezed as f64 * SQUEEZED_OUT_PENALTY;

    PositionAssignment {
        target,
        positions,
        roles_filled: filled,
        position_penalty: penalty,
        player_ids: roster.iter().map(|p| p.id).collect(),
    }
}
