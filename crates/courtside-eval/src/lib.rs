// Roster evaluation: positional fit, role assignment, scoring and feedback.
//
// Everything in this crate is pure. The same roster always produces the
// same evaluation.

pub mod assignment;
pub mod feedback;
pub mod fit;
pub mod legendary;
pub mod scoring;

pub use assignment::{assign_positional_roles, PositionAssignment};
pub use feedback::{feedback_message, legendary_feedback, tier_message, weakest_area, Weakness};
pub use fit::positional_fit;
pub use legendary::{evaluate_legendary, ActivatedCombo, LegendaryCombo, LegendaryResult};
pub use scoring::{score_roster, Metric, RosterEvaluation, ScoreBreakdown};
