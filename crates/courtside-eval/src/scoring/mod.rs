// Roster scoring engine.
//
// Ten sub-scores on a 0-200 scale grouped into three weighted groups:
//
//   core (0.25)          versatility, clutch
//   fundamentals (0.35)  offense, defense, playmaking, rebounding
//   composition (0.40)   position balance, height fit, chemistry, legendary
//
// The final score is the weighted sum of the group means, rounded.

pub mod attributes;
pub mod composition;
pub mod fundamentals;
pub mod height;

use std::fmt;
use std::sync::Arc;

use courtside_core::Player;
use serde::Serialize;
use tracing::debug;

use crate::assignment::{assign_positional_roles, PositionAssignment};
use crate::legendary::{evaluate_legendary, LegendaryResult};

/// Upper bound of every sub-score.
pub const MAX_SUB_SCORE: f64 = 200.0;

const CORE_WEIGHT: f64 = 0.25;
const FUNDAMENTALS_WEIGHT: f64 = 0.35;
const COMPOSITION_WEIGHT: f64 = 0.40;

// ---------------------------------------------------------------------------
// Breakdown types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoreAttributes {
    pub versatility: f64,
    pub clutch: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FundamentalSkills {
    pub offense: f64,
    pub defense: f64,
    pub playmaking: f64,
    pub rebounding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamComposition {
    pub position_balance: f64,
    pub height_fit: f64,
    pub chemistry: f64,
    pub legendary_teammates: f64,
}

/// Every named sub-score of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub core: CoreAttributes,
    pub fundamentals: FundamentalSkills,
    pub composition: TeamComposition,
}

/// Names of the ten sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Versatility,
    Clutch,
    Offense,
    Defense,
    Playmaking,
    Rebounding,
    PositionBalance,
    HeightFit,
    Chemistry,
    LegendaryTeammates,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::Versatility,
        Metric::Clutch,
        Metric::Offense,
        Metric::Defense,
        Metric::Playmaking,
        Metric::Rebounding,
        Metric::PositionBalance,
        Metric::HeightFit,
        Metric::Chemistry,
        Metric::LegendaryTeammates,
    ];

    /// Human-readable name used in feedback text.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Versatility => "versatility",
            Metric::Clutch => "clutch",
            Metric::Offense => "offense",
            Metric::Defense => "defense",
            Metric::Playmaking => "playmaking",
            Metric::Rebounding => "rebounding",
            Metric::PositionBalance => "position balance",
            Metric::HeightFit => "height fit",
            Metric::Chemistry => "chemistry",
            Metric::LegendaryTeammates => "legendary teammates",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ScoreBreakdown {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Versatility => self.core.versatility,
            Metric::Clutch => self.core.clutch,
            Metric::Offense => self.fundamentals.offense,
            Metric::Defense => self.fundamentals.defense,
            Metric::Playmaking => self.fundamentals.playmaking,
            Metric::Rebounding => self.fundamentals.rebounding,
            Metric::PositionBalance => self.composition.position_balance,
            Metric::HeightFit => self.composition.height_fit,
            Metric::Chemistry => self.composition.chemistry,
            Metric::LegendaryTeammates => self.composition.legendary_teammates,
        }
    }

    /// All sub-scores in group order.
    pub fn metrics(&self) -> Vec<(Metric, f64)> {
        Metric::ALL.iter().map(|&m| (m, self.get(m))).collect()
    }

    pub fn core_mean(&self) -> f64 {
        (self.core.versatility + self.core.clutch) / 2.0
    }

    pub fn fundamentals_mean(&self) -> f64 {
        let f = &self.fundamentals;
        (f.offense + f.defense + f.playmaking + f.rebounding) / 4.0
    }

    pub fn composition_mean(&self) -> f64 {
        let c = &self.composition;
        (c.position_balance + c.height_fit + c.chemistry + c.legendary_teammates) / 4.0
    }

    /// Weighted, unrounded final score.
    pub fn weighted_total(&self) -> f64 {
        self.core_mean() * CORE_WEIGHT
            + self.fundamentals_mean() * FUNDAMENTALS_WEIGHT
            + self.composition_mean() * COMPOSITION_WEIGHT
    }
}

/// Result of scoring one roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEvaluation {
    /// Final score, 0-200.
    pub score: u32,
    /// `None` for an empty roster.
    pub breakdown: Option<ScoreBreakdown>,
    pub legendary: LegendaryResult,
    pub assignment: PositionAssignment,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Score a roster. An empty roster scores 0 with no breakdown.
pub fn score_roster(roster: &[Arc<Player>]) -> RosterEvaluation {
    let assignment = assign_positional_roles(roster);
    if roster.is_empty() {
        return RosterEvaluation {
            score: 0,
            breakdown: None,
            legendary: LegendaryResult::default(),
            assignment,
        };
    }

    let legendary = evaluate_legendary(roster);

    let breakdown = ScoreBreakdown {
        core: CoreAttributes {
            versatility: attributes::versatility(roster),
            clutch: attributes::clutch(roster),
        },
        fundamentals: FundamentalSkills {
            offense: fundamentals::offense(roster),
            defense: fundamentals::defense(roster),
            playmaking: fundamentals::playmaking(roster),
            rebounding: fundamentals::rebounding(roster),
        },
        composition: TeamComposition {
            position_balance: composition::position_balance(roster, &assignment),
            height_fit: height::height_fit(roster, &assignment),
            chemistry: composition::chemistry(roster, &assignment),
            legendary_teammates: f64::from(legendary.bonus),
        },
    };

    let score = breakdown.weighted_total().round().clamp(0.0, MAX_SUB_SCORE) as u32;
    debug!(
        "Scored roster of {}: {} (core {:.1}, fundamentals {:.1}, composition {:.1})",
        roster.len(),
        score,
        breakdown.core_mean(),
        breakdown.fundamentals_mean(),
        breakdown.composition_mean()
    );

    RosterEvaluation {
        score,
        breakdown: Some(breakdown),
        legendary,
        assignment,
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Mean of `f` over the roster; 0 for an empty roster.
pub(crate) fn roster_mean<F>(roster: &[Arc<Player>], f: F) -> f64
where
    F: Fn(&Player) -> f64,
{
    if roster.is_empty() {
        return 0.0;
    }
    roster.iter().map(|p| f(p)).sum::<f64>() / roster.len() as f64
}

/// Share of the roster satisfying `pred`; 0 for an empty roster.
pub(crate) fn roster_ratio<F>(roster: &[Arc<Player>], pred: F) -> f64
where
    F: Fn(&Player) -> bool,
{
    if roster.is_empty() {
        return 0.0;
    }
    roster.iter().filter(|p| pred(p)).count() as f64 / roster.len() as f64
}

/// Map a 0-100 value onto the 0-200 sub-score scale.
pub(crate) fn to_sub_score(value: f64) -> f64 {
    (value * 2.0).clamp(0.0, MAX_SUB_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::Position;

    fn uniform(id: u32, pos: Position, rating: f64, height: u32) -> Arc<Player> {
        Arc::new(
            Player::new(id, &format!("P{id}"), pos, rating as u8)
                .with_uniform_attributes(rating)
                .with_height(height),
        )
    }

    fn starting_five(rating: f64) -> Vec<Arc<Player>> {
        [
            (Position::PointGuard, 75),
            (Position::ShootingGuard, 77),
            (Position::SmallForward, 79),
            (Position::PowerForward, 81),
            (Position::Center, 83),
        ]
            .iter()
            .enumerate()
            .map(|(i, &(pos, h))| uniform(i as u32 + 1, pos, rating, h))
            .collect()
    }

    #[test]
    fn empty_roster_scores_zero_without_breakdown() {
        let eval = score_roster(&[]);
        assert_eq!(eval.score, 0);
        assert!(eval.breakdown.is_none());
        assert!(eval.legendary.combinations.is_empty());
    }

    #[test]
    fn every_sub_score_within_range() {
        for rating in [0.0, 40.0, 75.0, 99.0] {
            let eval = score_roster(&starting_five(rating));
            let breakdown = eval.breakdown.unwrap();
            for (metric, value) in breakdown.metrics() {
                assert!(
                    (0.0..=MAX_SUB_SCORE).contains(&value),
                    "{metric} = {value} at rating {rating}"
                );
            }
            assert!(eval.score <= 200);
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let roster = starting_five(82.0);
        assert_eq!(score_roster(&roster), score_roster(&roster));
    }

    #[test]
    fn better_players_score_higher() {
        let weak = score_roster(&starting_five(60.0));
        let strong = score_roster(&starting_five(92.0));
        assert!(strong.score > weak.score);
    }

    #[test]
    fn final_score_is_rounded_weighted_sum() {
        let eval = score_roster(&starting_five(85.0));
        let breakdown = eval.breakdown.unwrap();
        assert_eq!(eval.score, breakdown.weighted_total().round() as u32);
    }

    #[test]
    fn legendary_bonus_lands_in_composition() {
        let mut roster = starting_five(80.0);
        roster[0] = Arc::new(Player::new(10, "Kobe Bryant", Position::ShootingGuard, 95));
        roster[1] = Arc::new(Player::new(11, "Shaquille O'Neal", Position::Center, 95));
        let eval = score_roster(&roster);
        assert_eq!(eval.breakdown.unwrap().composition.legendary_teammates, 40.0);
        assert_eq!(eval.legendary.bonus, 40);
    }

    #[test]
    fn metric_lookup_matches_fields() {
        let breakdown = score_roster(&starting_five(80.0)).breakdown.unwrap();
        assert_eq!(breakdown.get(Metric::Defense), breakdown.fundamentals.defense);
        assert_eq!(breakdown.metrics().len(), 10);
    }

    #[test]
    fn labels_match_feedback_wording() {
        assert_eq!(Metric::HeightFit.label(), "height fit");
        assert_eq!(Metric::HeightFit.to_string(), "height fit");
        assert_eq!(Metric::PositionBalance.label(), "position balance");
        assert_eq!(Metric::LegendaryTeammates.label(), "legendary teammates");
    }
}
