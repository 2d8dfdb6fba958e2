// Height fit: per-position ideal heights, seven-footer share and team
// average height band.

use std::sync::Arc;

use courtside_core::{Player, Position};

use super::to_sub_score;
use crate::assignment::PositionAssignment;

const POSITIONAL_WEIGHT: f64 = 0.5;
const SEVEN_FOOTER_WEIGHT: f64 = 0.3;
const AVERAGE_BAND_WEIGHT: f64 = 0.2;

/// Points lost per inch outside a position's ideal band.
const PENALTY_PER_INCH: f64 = 15.0;

const SEVEN_FEET: u32 = 84;
const SEVEN_FOOTER_NONE: f64 = 40.0;
const SEVEN_FOOTER_MAX_RATIO: f64 = 0.3;

/// Team-average band: zero below `MIN`, ideal between the two middle marks,
/// zero again from `MAX` upward.
const AVERAGE_MIN: f64 = 72.0;
const AVERAGE_IDEAL_LOW: f64 = 78.0;
const AVERAGE_IDEAL_HIGH: f64 = 81.0;
const AVERAGE_MAX: f64 = 84.0;

/// Inclusive ideal height range (inches) for a position.
pub fn ideal_band(position: Position) -> (u32, u32) {
    match position {
        Position::PointGuard => (74, 77),
        Position::ShootingGuard => (76, 78),
        Position::SmallForward => (78, 80),
        Position::PowerForward => (80, 82),
        Position::Center => (82, 85),
    }
}

/// 100 inside the ideal band, minus 15 per inch outside it, floored at 0.
pub fn positional_height(height_inches: u32, position: Position) -> f64 {
    let (low, high) = ideal_band(position);
    let off_by = if height_inches < low {
        low - height_inches
    } else if height_inches > high {
        height_inches - high
    } else {
        0
    };
    (100.0 - PENALTY_PER_INCH * off_by as f64).max(0.0)
}

/// 40 with no seven-footers, 100 up to a 30% share, decaying beyond.
pub fn seven_footer_score(roster: &[Arc<Player>]) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    let count = roster.iter().filter(|p| p.height_inches >= SEVEN_FEET).count();
    if count == 0 {
        return SEVEN_FOOTER_NONE;
    }
    let ratio = count as f64 / roster.len() as f64;
    if ratio <= SEVEN_FOOTER_MAX_RATIO {
        100.0
    } else {
        (100.0 - (ratio - SEVEN_FOOTER_MAX_RATIO) * 200.0).max(0.0)
    }
}

/// Score the team's average height against the ideal band.
pub fn average_band_score(average_inches: f64) -> f64 {
    if average_inches < AVERAGE_MIN {
        0.0
    } else if average_inches < AVERAGE_IDEAL_LOW {
        (average_inches - AVERAGE_MIN) / (AVERAGE_IDEAL_LOW - AVERAGE_MIN) * 100.0
    } else if average_inches <= AVERAGE_IDEAL_HIGH {
        100.0
    } else {
        (100.0 - (average_inches - AVERAGE_IDEAL_HIGH) / (AVERAGE_MAX - AVERAGE_IDEAL_HIGH) * 100.0)
            .max(0.0)
    }
}

/// Blend of the three height components, on the 0-200 scale.
///
/// Unassigned players contribute 0 to the positional component.
pub fn height_fit(roster: &[Arc<Player>], assignment: &PositionAssignment) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    let n = roster.len() as f64;

    let positional: f64 = roster
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            assignment
                .position_at(idx)
                .map_or(0.0, |pos| positional_height(p.height_inches, pos))
        })
        .sum::<f64>()
        / n;

    let average = roster.iter().map(|p| f64::from(p.height_inches)).sum::<f64>() / n;

    to_sub_score(
        POSITIONAL_WEIGHT * positional
            + SEVEN_FOOTER_WEIGHT * seven_footer_score(roster)
            + AVERAGE_BAND_WEIGHT * average_band_score(average),
    )
}
