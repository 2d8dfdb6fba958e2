// Fundamental skills: offense, defense, playmaking, rebounding.
//
// Each is a roster mean of a per-player 0-100 rating, doubled onto the
// sub-score scale.

use std::sync::Arc;

use courtside_core::Player;

use super::{roster_mean, to_sub_score};

/// Points per specialty badge in the scoring components.
const BADGE_POINTS: f64 = 2.5;

/// Rating a player must exceed to earn a threshold bonus.
const STANDOUT: f64 = 85.0;

// ---------------------------------------------------------------------------
// Offense components (per player, 0-100)
// ---------------------------------------------------------------------------

pub fn inside_presence(p: &Player) -> f64 {
    let i = &p.inside_scoring;
    let base = (i.close_shot * 0.3 + i.post_control * 0.3 + i.driving_dunk * 0.2) / 0.8;
    (base + BADGE_POINTS * f64::from(p.badges.inside_scoring)).min(100.0)
}

pub fn outside_scoring(p: &Player) -> f64 {
    let s = &p.shooting;
    let base = (s.three_point * 0.4 + s.mid_range * 0.3 + s.shot_iq * 0.2) / 0.9;
    (base + BADGE_POINTS * f64::from(p.badges.outside_scoring)).min(100.0)
}

pub fn off_ball(p: &Player) -> f64 {
    let base = (p.athleticism.speed * 0.2
        + p.athleticism.agility * 0.2
        + p.shooting.shot_iq * 0.3
        + p.intangibles.offensive_consistency * 0.2)
        / 0.9;
    let badges = f64::from(p.badges.inside_scoring + p.badges.outside_scoring) * BADGE_POINTS / 2.0;
    let catch_and_shoot = if p.shooting.three_point > STANDOUT || p.shooting.mid_range > STANDOUT {
        10.0
    } else {
        0.0
    };
    (base + badges + catch_and_shoot).min(100.0)
}

pub fn transition(p: &Player) -> f64 {
    let a = &p.athleticism;
    let pm = &p.playmaking;
    let base = (a.speed * 0.25
        + a.stamina * 0.15
        + pm.speed_with_ball * 0.2
        + pm.pass_vision * 0.2
        + a.hustle * 0.1)
        / 0.9;

    let mut bonus = 0.0;
    if p.inside_scoring.driving_dunk > STANDOUT || p.inside_scoring.layup > STANDOUT {
        bonus += 10.0;
    }
    if pm.pass_accuracy > STANDOUT && pm.pass_vision > STANDOUT {
        bonus += 10.0;
    }
    if a.speed > STANDOUT && a.stamina > STANDOUT {
        bonus += 5.0;
    }
    (base + bonus).min(100.0)
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

pub fn offense(roster: &[Arc<Player>]) -> f64 {
    let components = [
        roster_mean(roster, inside_presence),
        roster_mean(roster, outside_scoring),
        roster_mean(roster, off_ball),
        roster_mean(roster, transition),
    ];
    to_sub_score(components.iter().sum::<f64>() / components.len() as f64)
}

pub fn defense(roster: &[Arc<Player>]) -> f64 {
    to_sub_score(roster_mean(roster, |p| {
        p.defense.interior * 0.35 + p.defense.perimeter * 0.35 + p.intangibles.help_defense_iq * 0.3
    }))
}

pub fn playmaking(roster: &[Arc<Player>]) -> f64 {
    to_sub_score(roster_mean(roster, |p| {
        let pm = &p.playmaking;
        (pm.pass_accuracy + pm.pass_iq + pm.pass_vision) / 3.0
    }))
}

pub fn rebounding(roster: &[Arc<Player>]) -> f64 {
    to_sub_score(roster_mean(roster, |p| {
        p.defense.offensive_rebound * 0.4 + p.defense.defensive_rebound * 0.6
    }))
}
