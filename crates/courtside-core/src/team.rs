// Teams, positional needs and the team factory.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::player::Player;
use crate::position::Position;

/// Team identifier. Ids are 1-based; the user's team is always 1.
pub type TeamId = u32;

/// Id given to the user's team by `build_teams`.
pub const USER_TEAM_ID: TeamId = 1;

/// Share of the total rounds each position should receive.
const TARGET_SHARE_PER_POSITION: f64 = 0.2;

/// Weight a secondary position contributes to that position's need count.
const SECONDARY_POSITION_WEIGHT: f64 = 0.5;

/// The 30 franchises AI teams are named after.
pub const NBA_TEAMS: [&str; 30] = [
    "Atlanta Hawks",
    "Boston Celtics",
    "Brooklyn Nets",
    "Charlotte Hornets",
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Detroit Pistons",
    "Golden State Warriors",
    "Houston Rockets",
    "Indiana Pacers",
    "Los Angeles Clippers",
    "Los Angeles Lakers",
    "Memphis Grizzlies",
    "Miami Heat",
    "Milwaukee Bucks",
    "Minnesota Timberwolves",
    "New Orleans Pelicans",
    "New York Knicks",
    "Oklahoma City Thunder",
    "Orlando Magic",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "Sacramento Kings",
    "San Antonio Spurs",
    "Toronto Raptors",
    "Utah Jazz",
    "Washington Wizards",
];

#[derive(Debug, Error, PartialEq)]
pub enum TeamError {
    #[error("invalid team configuration: {0}")]
    InvalidConfiguration(String),
}

// ---------------------------------------------------------------------------
// Needs
// ---------------------------------------------------------------------------

/// Current vs. target player count for one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionNeed {
    /// Weighted count: 1.0 per primary match, 0.5 per secondary match.
    pub current: f64,
    pub target: u32,
}

impl PositionNeed {
    /// (target - current) / target; `None` when the target is zero.
    pub fn priority(&self) -> Option<f64> {
        if self.target == 0 {
            return None;
        }
        let target = self.target as f64;
        Some((target - self.current) / target)
    }
}

/// Per-position needs of a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamNeeds(BTreeMap<Position, PositionNeed>);

impl TeamNeeds {
    /// Per-position target for a draft of `total_rounds` rounds.
    pub fn target_for_rounds(total_rounds: u32) -> u32 {
        (total_rounds as f64 * TARGET_SHARE_PER_POSITION).ceil() as u32
    }

    /// Needs of a team with an empty roster.
    pub fn empty(total_rounds: u32) -> Self {
        Self::for_roster(&[], total_rounds)
    }

    /// Recompute needs from a roster.
    pub fn for_roster(roster: &[Arc<Player>], total_rounds: u32) -> Self {
        let target = Self::target_for_rounds(total_rounds);
        let mut needs: BTreeMap<Position, PositionNeed> = Position::ALL
            .iter()
            .map(|&pos| (pos, PositionNeed { current: 0.0, target }))
            .collect();

        for player in roster {
            if let Some(need) = needs.get_mut(&player.primary_position) {
                need.current += 1.0;
            }
            if let Some(sec) = player.secondary_position {
                if let Some(need) = needs.get_mut(&sec) {
                    need.current += SECONDARY_POSITION_WEIGHT;
                }
            }
        }

        TeamNeeds(needs)
    }

    /// Build needs from explicit (position, current, target) entries.
    /// Positions not listed get `{current: 0, target: 0}`.
    pub fn from_entries(entries: &[(Position, f64, u32)]) -> Self {
        let mut needs: BTreeMap<Position, PositionNeed> = Position::ALL
            .iter()
            .map(|&pos| (pos, PositionNeed { current: 0.0, target: 0 }))
            .collect();
        for &(pos, current, target) in entries {
            needs.insert(pos, PositionNeed { current, target });
        }
        TeamNeeds(needs)
    }

    pub fn get(&self, pos: Position) -> Option<&PositionNeed> {
        self.0.get(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &PositionNeed)> {
        self.0.iter().map(|(&pos, need)| (pos, need))
    }

    /// Positions with a positive target, sorted by descending priority.
    /// Ties keep canonical position order.
    pub fn priorities(&self) -> Vec<(Position, f64)> {
        let mut priorities: Vec<(Position, f64)> = self
            .iter()
            .filter_map(|(pos, need)| need.priority().map(|p| (pos, p)))
            .collect();
        priorities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        priorities
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// A drafting team.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub is_user: bool,
    /// Drafted players in pick order. Append-only during a draft.
    pub roster: Vec<Arc<Player>>,
    pub needs: TeamNeeds,
    pub total_rounds: u32,
}

impl Team {
    pub fn new(id: TeamId, name: &str, is_user: bool, total_rounds: u32) -> Self {
        Team {
            id,
            name: name.to_string(),
            is_user,
            roster: Vec::new(),
            needs: TeamNeeds::empty(total_rounds),
            total_rounds,
        }
    }

    /// Append a player and recompute needs.
    pub fn add_player(&mut self, player: Arc<Player>) {
        self.roster.push(player);
        self.needs = TeamNeeds::for_roster(&self.roster, self.total_rounds);
    }

    /// Empty the roster and reset needs.
    pub fn reset_roster(&mut self) {
        self.roster.clear();
        self.needs = TeamNeeds::empty(self.total_rounds);
    }

    pub fn has_player(&self, player_id: u32) -> bool {
        self.roster.iter().any(|p| p.id == player_id)
    }
}

// ---------------------------------------------------------------------------
// Team factory
// ---------------------------------------------------------------------------

/// Build the user's team (id 1) plus `ai_team_count` AI teams (ids 2..).
///
/// AI teams are named after randomly chosen franchises; a franchise whose
/// name matches the user's team name is never handed to an AI team.
pub fn build_teams<R: Rng + ?Sized>(
    rounds: u32,
    ai_team_count: usize,
    user_team_name: &str,
    rng: &mut R,
) -> Result<Vec<Team>, TeamError> {
    if rounds == 0 {
        return Err(TeamError::InvalidConfiguration(
            "rounds must be greater than 0".into(),
        ));
    }
    if ai_team_count == 0 {
        return Err(TeamError::InvalidConfiguration(
            "at least one AI team is required".into(),
        ));
    }

    let mut names: Vec<&str> = NBA_TEAMS
        .iter()
        .copied()
        .filter(|name| !name.eq_ignore_ascii_case(user_team_name.trim()))
        .collect();
    if ai_team_count > names.len() {
        return Err(TeamError::InvalidConfiguration(format!(
            "at most {} AI teams are available, got {ai_team_count}",
            names.len()
        )));
    }
    names.shuffle(rng);

    let user_name = match user_team_name.trim() {
        "" => "Your Team",
        name => name,
    };

    let mut teams = Vec::with_capacity(ai_team_count + 1);
    teams.push(Team::new(USER_TEAM_ID, user_name, true, rounds));
    for (i, name) in names.into_iter().take(ai_team_count).enumerate() {
        teams.push(Team::new(USER_TEAM_ID + 1 + i as TeamId, name, false, rounds));
    }

    debug!(
        "Built {} teams ({} AI) for a {}-round draft",
        teams.len(),
        ai_team_count,
        rounds
    );
    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(id: u32, primary: Position, secondary: Option<Position>) -> Arc<Player> {
        let mut p = Player::new(id, &format!("Player {id}"), primary, 80);
        if let Some(sec) = secondary {
            p = p.with_secondary(sec);
        }
        Arc::new(p)
    }

    #[test]
    fn target_is_twenty_percent_of_rounds_rounded_up() {
        assert_eq!(TeamNeeds::target_for_rounds(5), 1);
        assert_eq!(TeamNeeds::target_for_rounds(7), 2);
        assert_eq!(TeamNeeds::target_for_rounds(10), 2);
        assert_eq!(TeamNeeds::target_for_rounds(12), 3);
    }

    #[test]
    fn needs_count_primary_full_and_secondary_half() {
        let roster = vec![
            player(1, Position::PointGuard, Some(Position::ShootingGuard)),
            player(2, Position::ShootingGuard, None),
            player(3, Position::Center, Some(Position::PowerForward)),
        ];
        let needs = TeamNeeds::for_roster(&roster, 10);

        assert_eq!(needs.get(Position::PointGuard).unwrap().current, 1.0);
        assert_eq!(needs.get(Position::ShootingGuard).unwrap().current, 1.5);
        assert_eq!(needs.get(Position::PowerForward).unwrap().current, 0.5);
        assert_eq!(needs.get(Position::Center).unwrap().current, 1.0);
        assert_eq!(needs.get(Position::SmallForward).unwrap().current, 0.0);
        assert!(needs.iter().all(|(_, n)| n.target == 2));
    }

    #[test]
    fn priorities_sorted_descending() {
        let needs = TeamNeeds::from_entries(&[
            (Position::PointGuard, 0.0, 2),
            (Position::ShootingGuard, 1.0, 2),
            (Position::SmallForward, 2.0, 2),
            (Position::PowerForward, 3.0, 2),
            (Position::Center, 2.0, 2),
        ]);
        let priorities = needs.priorities();
        assert_eq!(priorities[0], (Position::PointGuard, 1.0));
        assert_eq!(priorities[1], (Position::ShootingGuard, 0.5));
        assert_eq!(priorities.last().unwrap(), &(Position::PowerForward, -0.5));
    }

    #[test]
    fn zero_target_positions_have_no_priority() {
        let needs = TeamNeeds::from_entries(&[(Position::Center, 0.0, 1)]);
        let priorities = needs.priorities();
        assert_eq!(priorities, vec![(Position::Center, 1.0)]);
    }

    #[test]
    fn add_player_recomputes_needs() {
        let mut team = Team::new(1, "Mine", true, 5);
        team.add_player(player(7, Position::Center, None));
        assert_eq!(team.roster.len(), 1);
        assert_eq!(team.needs.get(Position::Center).unwrap().current, 1.0);
        assert!(team.has_player(7));

        team.reset_roster();
        assert!(team.roster.is_empty());
        assert_eq!(team.needs, TeamNeeds::empty(5));
    }

    #[test]
    fn build_teams_user_first_with_unique_ai_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let teams = build_teams(5, 5, "Your Team", &mut rng).unwrap();

        assert_eq!(teams.len(), 6);
        assert_eq!(teams.iter().filter(|t| t.is_user).count(), 1);
        assert_eq!(teams[0].id, USER_TEAM_ID);
        assert!(teams[0].is_user);
        let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let mut names: Vec<&str> = teams[1..].iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
        assert!(teams.iter().all(|t| t.total_rounds == 5 && t.roster.is_empty()));
    }

    #[test]
    fn build_teams_never_reuses_user_franchise() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let teams = build_teams(5, 29, "Boston Celtics", &mut rng).unwrap();
        assert_eq!(teams.len(), 30);
        assert_eq!(
            teams.iter().filter(|t| t.name == "Boston Celtics").count(),
            1
        );
    }

    #[test]
    fn build_teams_rejects_bad_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(build_teams(0, 5, "Mine", &mut rng).is_err());
        assert!(build_teams(5, 0, "Mine", &mut rng).is_err());
        assert!(build_teams(5, 30, "Boston Celtics", &mut rng).is_err());
    }

    #[test]
    fn blank_user_name_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let teams = build_teams(5, 3, "  ", &mut rng).unwrap();
        assert_eq!(teams[0].name, "Your Team");
    }

    #[test]
    fn cloned_team_shares_player_handles() {
        let mut team = Team::new(USER_TEAM_ID, "Mine", true, 5);
        team.add_player(player(7, Position::Center, None));
        let snapshot = team.clone();
        assert!(Arc::ptr_eq(&team.roster[0], &snapshot.roster[0]));
        assert_eq!(Arc::strong_count(&team.roster[0]), 2);
        assert_eq!(snapshot.needs, team.needs);
        assert!(snapshot.has_player(7));
    }
}
