// Core attributes: lineup versatility and clutch capability.

use std::sync::Arc;

use courtside_core::{Player, Position};

use super::{roster_ratio, MAX_SUB_SCORE};
use crate::fit::positional_fit;

const SMALL_BALL_POINTS: f64 = 25.0;
const TALL_BALL_POINTS: f64 = 25.0;
const SWITCHABLE_POINTS: f64 = 30.0;
const FLEXIBLE_POINTS: f64 = 20.0;

/// Fit a player needs at their secondary position to count as flexible.
const FLEXIBLE_FIT: f64 = 70.0;

/// Elite threshold used by the clutch checks.
const CLUTCH_THRESHOLD: f64 = 85.0;

fn is_switchable(p: &Player) -> bool {
    p.defense.perimeter >= 75.0 && p.defense.interior >= 75.0 && p.athleticism.agility >= 75.0
}

fn is_flexible(p: &Player) -> bool {
    p.secondary_position
        .is_some_and(|sec| positional_fit(p, sec) >= FLEXIBLE_FIT)
}

/// Small-ball and tall-ball options plus switchable and multi-position depth.
pub fn versatility(roster: &[Arc<Player>]) -> f64 {
    let small_ball = roster.iter().any(|p| {
        p.primary_position == Position::PowerForward
            && p.defense.perimeter >= 75.0
            && p.athleticism.speed >= 75.0
    });
    let tall_ball = roster
        .iter()
        .any(|p| p.primary_position == Position::Center && p.shooting.three_point >= 70.0);

    let mut raw = 0.0;
    if small_ball {
        raw += SMALL_BALL_POINTS;
    }
    if tall_ball {
        raw += TALL_BALL_POINTS;
    }
    raw += SWITCHABLE_POINTS * roster_ratio(roster, is_switchable);
    raw += FLEXIBLE_POINTS * roster_ratio(roster, is_flexible);

    2.0 * raw.clamp(0.0, 100.0)
}

fn is_clutch_scorer(p: &Player) -> bool {
    (p.shooting.shot_iq >= CLUTCH_THRESHOLD || p.inside_scoring.close_shot >= CLUTCH_THRESHOLD)
        && p.intangibles.offensive_consistency >= CLUTCH_THRESHOLD
}

fn is_reliable_free_throw(p: &Player) -> bool {
    p.shooting.free_throw >= CLUTCH_THRESHOLD
}

fn is_clutch_defender(p: &Player) -> bool {
    p.defense.perimeter >= CLUTCH_THRESHOLD
        || (p.defense.interior >= CLUTCH_THRESHOLD
            && p.intangibles.defensive_consistency >= CLUTCH_THRESHOLD)
}

/// Late-game scorers, free-throw shooters and stoppers, each saturating at
/// a target share of the roster.
pub fn clutch(roster: &[Arc<Player>]) -> f64 {
    let scorers = (roster_ratio(roster, is_clutch_scorer) / 0.4).min(1.0);
    let shooters = (roster_ratio(roster, is_reliable_free_throw) / 0.6).min(1.0);
    let defenders = (roster_ratio(roster, is_clutch_defender) / 0.4).min(1.0);

    MAX_SUB_SCORE * (0.5 * scorers + 0.2 * shooters + 0.3 * defenders)
}
