// Team composition: position balance and chemistry. Both read the
// positional assignment, so they only credit players who landed a slot.

use std::sync::Arc;

use courtside_core::Player;

use super::MAX_SUB_SCORE;
use crate::assignment::PositionAssignment;
use crate::fit::positional_fit;

/// Fit baseline that neither adds to nor subtracts from position balance.
const BALANCE_FIT_BASELINE: f64 = 70.0;

/// Fit at which an assigned player counts toward the chemistry fit bonus.
const GOOD_FIT: f64 = 75.0;

const SPACING_BONUS: f64 = 40.0;
const FEEDING_BONUS: f64 = 30.0;
const BALL_DOMINANCE_CAP: f64 = 30.0;
const FIT_CHEMISTRY_POINTS: f64 = 100.0;

/// Fit at the assigned position for each roster player, 0 when unassigned.
fn assigned_fits<'a>(
    roster: &'a [Arc<Player>],
    assignment: &'a PositionAssignment,
) -> impl Iterator<Item = f64> + 'a {
    roster.iter().enumerate().map(move |(idx, p)| {
        assignment
            .position_at(idx)
            .map_or(0.0, |pos| positional_fit(p, pos))
    })
}

/// 200 less the assignment penalty, nudged by how well players fit their slots.
pub fn position_balance(roster: &[Arc<Player>], assignment: &PositionAssignment) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    let average_fit = assigned_fits(roster, assignment).sum::<f64>() / roster.len() as f64;
    (MAX_SUB_SCORE - assignment.position_penalty + (average_fit - BALANCE_FIT_BASELINE))
        .clamp(0.0, MAX_SUB_SCORE)
}

fn is_shooter(p: &Player) -> bool {
    p.shooting.three_point >= 80.0
}

fn is_slasher(p: &Player) -> bool {
    p.inside_scoring.driving_dunk >= 80.0 || p.inside_scoring.layup >= 80.0
}

fn is_playmaker(p: &Player) -> bool {
    (p.playmaking.pass_vision + p.playmaking.pass_iq) / 2.0 >= 80.0
}

fn is_finisher(p: &Player) -> bool {
    p.inside_scoring.standing_dunk >= 80.0 || p.shooting.three_point >= 80.0
}

fn is_ball_dominant(p: &Player) -> bool {
    p.playmaking.ball_handle >= 85.0
}

/// Spacing, feeding and ball-dominance checks scaled by the slot target,
/// plus a bonus for the share of players assigned where they fit well.
pub fn chemistry(roster: &[Arc<Player>], assignment: &PositionAssignment) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    let assigned: Vec<&Player> = assignment
        .assigned()
        .map(|(idx, _)| roster[idx].as_ref())
        .collect();
    let count = |pred: fn(&Player) -> bool| assigned.iter().filter(|p| pred(p)).count();
    let per_slot = assignment.target;

    let mut score = 0.0;
    if count(is_shooter) >= 2 * per_slot && count(is_slasher) >= 2 * per_slot {
        score += SPACING_BONUS;
    }
    if 2 * count(is_playmaker) >= count(is_finisher) {
        score += FEEDING_BONUS;
    }
    let dominance_room = (3 * per_slot) as f64 - count(is_ball_dominant) as f64;
    score += (dominance_room * 10.0).min(BALL_DOMINANCE_CAP);

    let good_fits = assigned_fits(roster, assignment)
        .filter(|&fit| fit >= GOOD_FIT)
        .count();
    score += FIT_CHEMISTRY_POINTS * good_fits as f64 / roster.len() as f64;

    score.clamp(0.0, MAX_SUB_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::assign_positional_roles;
    use courtside_core::Position;

    fn uniform(id: u32, pos: Position, rating: f64) -> Arc<Player> {
        Arc::new(Player::new(id, &format!("P{id}"), pos, 80).with_uniform_attributes(rating))
    }

    fn five(rating: f64) -> Vec<Arc<Player>> {
        Position::ALL
            .iter()
            .enumerate()
            .map(|(i, &pos)| uniform(i as u32 + 1, pos, rating))
            .collect()
    }

    #[test]
    fn balance_rewards_fit_above_baseline() {
        let roster = five(80.0);
        let a = assign_positional_roles(&roster);
        assert!((position_balance(&roster, &a) - 200.0).abs() < 1e-9);

        let roster = five(60.0);
        let a = assign_positional_roles(&roster);
        assert!((position_balance(&roster, &a) - 190.0).abs() < 1e-9);
    }

    #[test]
    fn balance_subtracts_penalty() {
        // Six point guards: 400 penalty floors the score.
        let roster: Vec<Arc<Player>> =
            (1..=6).map(|i| uniform(i, Position::PointGuard, 80.0)).collect();
        let a = assign_positional_roles(&roster);
        assert_eq!(position_balance(&roster, &a), 0.0);
    }

    #[test]
    fn chemistry_for_mediocre_five() {
        let roster = five(60.0);
        let a = assign_positional_roles(&roster);
        // No shooters/slashers; 0 playmakers >= 0 finishers; 3 ball-dominance
        // room capped at 30; no good fits.
        assert!((chemistry(&roster, &a) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn chemistry_for_strong_five() {
        let roster = five(82.0);
        let a = assign_positional_roles(&roster);
        // 5 shooters and slashers >= 2; 5 playmakers feed 5 finishers; no
        // ball-dominant players; every fit 82 >= 75.
        assert!((chemistry(&roster, &a) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn too_many_ball_handlers_cost_points() {
        let roster = five(90.0);
        let a = assign_positional_roles(&roster);
        // 40 + 30 + (3 - 5) * 10 + 100
        assert!((chemistry(&roster, &a) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn unassigned_players_add_nothing() {
        let roster: Vec<Arc<Player>> =
            (1..=2).map(|i| uniform(i, Position::Center, 80.0)).collect();
        let a = assign_positional_roles(&roster);
        // Only the assigned center counts: no spacing, one playmaker feeds
        // one finisher, ball room 30, fit share 1/2.
        assert!((chemistry(&roster, &a) - 110.0).abs() < 1e-9);
    }
}
