// Draft order generation (snake / linear / random).

use courtside_core::{Team, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DraftError;

/// How the pick order evolves from round to round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftType {
    /// Order reverses every round.
    #[default]
    Snake,
    /// Identical order every round.
    #[serde(alias = "fixed")]
    Linear,
    /// Fresh shuffle every round.
    Random,
}

/// Where the user wants to pick within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserDraftPosition {
    #[default]
    First,
    Last,
    /// A slot drawn from the injected RNG.
    Random,
}

/// Settings that shape the draft order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrderConfig {
    pub rounds: u32,
    pub draft_type: DraftType,
    pub user_position: UserDraftPosition,
}

/// Compute the full pick sequence for `teams`.
///
/// Teams are expected to carry ids 1..=T (as produced by the team factory);
/// the user's slot is taken from the team flagged `is_user`.
pub fn generate_draft_order<R: Rng + ?Sized>(
    config: &DraftOrderConfig,
    teams: &[Team],
    rng: &mut R,
) -> Result<Vec<TeamId>, DraftError> {
    let user_team_id = teams
        .iter()
        .find(|t| t.is_user)
        .map(|t| t.id)
        .ok_or_else(|| DraftError::InvalidConfiguration("no user team".into()))?;
    build_order(teams.len(), user_team_id, config, rng)
}

/// Compute the pick sequence for `team_count` teams with ids 1..=team_count.
///
/// Returns `team_count * rounds` entries.
pub fn build_order<R: Rng + ?Sized>(
    team_count: usize,
    user_team_id: TeamId,
    config: &DraftOrderConfig,
    rng: &mut R,
) -> Result<Vec<TeamId>, DraftError> {
    if team_count < 1 {
        return Err(DraftError::InvalidConfiguration(
            "team count must be at least 1".into(),
        ));
    }
    if config.rounds < 1 {
        return Err(DraftError::InvalidConfiguration(
            "rounds must be at least 1".into(),
        ));
    }
    if user_team_id == 0 || user_team_id as usize > team_count {
        return Err(DraftError::InvalidConfiguration(format!(
            "user team id {user_team_id} outside 1..={team_count}"
        )));
    }

    let ascending: Vec<TeamId> = (1..=team_count as TeamId).collect();
    let mut order = Vec::with_capacity(team_count * config.rounds as usize);

    match config.draft_type {
        DraftType::Snake => {
            let base = place_user(ascending, user_team_id, config.user_position, rng);
            for round in 0..config.rounds {
                if round % 2 == 1 {
                    order.extend(base.iter().rev().copied());
                } else {
                    order.extend(base.iter().copied());
                }
            }
        }
        DraftType::Linear => {
            let base = place_user(ascending, user_team_id, config.user_position, rng);
            for _ in 0..config.rounds {
                order.extend(base.iter().copied());
            }
        }
        DraftType::Random => {
            // Every round is an independent permutation; the user slot
            // preference does not apply.
            for _ in 0..config.rounds {
                let mut round = ascending.clone();
                round.shuffle(rng);
                order.extend(round);
            }
        }
    }

    debug!(
        "Generated {:?} draft order: {} teams x {} rounds",
        config.draft_type, team_count, config.rounds
    );
    Ok(order)
}

/// Swap the user's id into the requested slot of the base round order.
fn place_user<R: Rng + ?Sized>(
    mut base: Vec<TeamId>,
    user_team_id: TeamId,
    position: UserDraftPosition,
    rng: &mut R,
) -> Vec<TeamId> {
    let Some(current) = base.iter().position(|&id| id == user_team_id) else {
        return base;
    };
    let target = match position {
        UserDraftPosition::First => 0,
        UserDraftPosition::Last => base.len() - 1,
        UserDraftPosition::Random => rng.gen_range(0..base.len()),
    };
    base.swap(current, target);
    base
}
