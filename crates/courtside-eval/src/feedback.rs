// Text feedback for an evaluated roster.

use crate::legendary::ActivatedCombo;
use crate::scoring::{Metric, RosterEvaluation, ScoreBreakdown};

/// Descending score bands and their messages.
const TIERS: [(u32, &str); 9] = [
    (160, "Your team is ELITE! You've built a dynasty-caliber roster that could dominate any era."),
    (
        150,
        "You've assembled a true CHAMPIONSHIP CONTENDER! This team has what it takes to compete \
         for titles.",
    ),
    (
        140,
        "Excellent work! Your team has the makings of a serious playoff threat with great \
         overall balance.",
    ),
    (
        130,
        "Solid roster construction! Your team shows real potential to make noise in the playoffs.",
    ),
    (120, "Good foundation! With some tweaks, this team could become a real contender."),
    (110, "You're on the right track! A few key additions could really elevate this roster."),
    (100, "This team has potential but needs some work to compete at a higher level."),
    (90, "Your team is still developing. Focus on building a more cohesive roster."),
    (80, "Keep working on your team composition. There's room for improvement across the board."),
];

const REBUILD: &str =
    "Time to rebuild! Focus on establishing a stronger foundation with your next draft.";

/// Tier message for a final score.
pub fn tier_message(score: u32) -> &'static str {
    TIERS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map_or(REBUILD, |&(_, message)| message)
}

/// Improvement suggestion for a metric.
pub fn suggestion(metric: Metric) -> &'static str {
    match metric {
        Metric::Versatility => {
            "Try drafting more players who can play multiple positions or have switchable \
             defensive skills."
        }
        Metric::Clutch => {
            "Look for players with high shot IQ and consistency ratings for those crucial \
             late-game situations."
        }
        Metric::Defense => {
            "Consider adding more defensive specialists or rim protectors to your roster."
        }
        Metric::Offense => {
            "Your team could use more scoring punch - look for efficient shooters and inside \
             scorers."
        }
        Metric::Playmaking => {
            "Try to add more players with strong passing and ball-handling abilities."
        }
        Metric::Rebounding => {
            "Focus on drafting players with strong rebounding ratings to control the glass."
        }
        Metric::Chemistry => "Look for players whose skills complement each other better.",
        Metric::HeightFit => "Try to balance your roster's height distribution across positions.",
        Metric::PositionBalance => "Focus on filling gaps in your positional coverage.",
        Metric::LegendaryTeammates => {
            "Consider drafting players with established chemistry from historic teams."
        }
    }
}

/// Lowest sub-score of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weakness {
    pub metric: Metric,
    pub value: f64,
    pub suggestion: &'static str,
}

/// The lowest-scoring metric. Ties go to the metric listed first.
pub fn weakest_area(breakdown: &ScoreBreakdown) -> Weakness {
    let (metric, value) = breakdown
        .metrics()
        .into_iter()
        .fold((Metric::Versatility, f64::INFINITY), |lowest, (m, v)| {
            if v < lowest.1 {
                (m, v)
            } else {
                lowest
            }
        });
    Weakness {
        metric,
        value,
        suggestion: suggestion(metric),
    }
}

/// "Nice! A and B are <description>!" for each activated combination.
pub fn legendary_feedback(combos: &[ActivatedCombo]) -> String {
    combos
        .iter()
        .map(|c| format!("Nice! {} are {}!", c.players.join(" and "), c.description))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full feedback: tier message, legendary shout-outs and the weakest area.
pub fn feedback_message(evaluation: &RosterEvaluation) -> String {
    let mut feedback = tier_message(evaluation.score).to_string();

    let legendary = legendary_feedback(&evaluation.legendary.combinations);
    if !legendary.is_empty() {
        feedback.push_str("\n\n");
        feedback.push_str(&legendary);
    }

    if let Some(breakdown) = &evaluation.breakdown {
        let weakness = weakest_area(breakdown);
        feedback.push_str(&format!(
            "\n\nRoom for improvement: Your team's {} ({}/200) could use work. {}",
            weakness.metric,
            weakness.value.round(),
            weakness.suggestion
        ));
    }

    feedback
}
