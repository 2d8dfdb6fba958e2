// Draft session: the state machine driven by `initialize` and `make_pick`.

use std::collections::HashSet;
use std::sync::Arc;

use courtside_core::{Player, PlayerId, Team, TeamId};
use tracing::{debug, info};

use crate::error::DraftError;

/// Lifecycle of a draft session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Active,
    Complete,
}

/// Audit record of a committed pick.
#[derive(Debug, Clone)]
pub struct DraftedPlayer {
    /// Sequential pick number (1-indexed).
    pub pick_number: usize,
    /// Round the pick fell in (1-indexed).
    pub round: usize,
    pub player: Arc<Player>,
    pub team_id: TeamId,
}

/// A single draft. Owned by the caller; every mutation goes through
/// `&mut self`, so picks are serialized by construction.
#[derive(Debug, Clone, Default)]
pub struct DraftSession {
    state: SessionState,
    available: Vec<Arc<Player>>,
    teams: Vec<Team>,
    draft_order: Vec<TeamId>,
    /// 1-based pointer into `draft_order`.
    current_pick: usize,
    is_user_turn: bool,
    drafted: Vec<DraftedPlayer>,
    pool_size: usize,
}

impl DraftSession {
    /// A session in the `Uninitialized` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the draft.
    ///
    /// Resets every roster, sets the pick pointer to 1 and derives whose turn
    /// it is from the first draft-order entry. Nothing changes if validation
    /// fails.
    pub fn initialize(
        &mut self,
        players: Vec<Arc<Player>>,
        mut teams: Vec<Team>,
        draft_order: Vec<TeamId>,
    ) -> Result<(), DraftError> {
        if draft_order.is_empty() {
            return Err(DraftError::InvalidConfiguration(
                "draft order is empty".into(),
            ));
        }

        let user_teams = teams.iter().filter(|t| t.is_user).count();
        if user_teams != 1 {
            return Err(DraftError::InvalidConfiguration(format!(
                "expected exactly one user team, found {user_teams}"
            )));
        }

        let mut team_ids = HashSet::new();
        for team in &teams {
            if !team_ids.insert(team.id) {
                return Err(DraftError::InvalidConfiguration(format!(
                    "duplicate team id {}",
                    team.id
                )));
            }
        }
        if let Some(&unknown) = draft_order.iter().find(|id| !team_ids.contains(id)) {
            return Err(DraftError::InvalidConfiguration(format!(
                "draft order references unknown team id {unknown}"
            )));
        }

        let mut player_ids = HashSet::new();
        for player in &players {
            if !player_ids.insert(player.id) {
                return Err(DraftError::InvalidConfiguration(format!(
                    "duplicate player id {} ({})",
                    player.id, player.name
                )));
            }
        }

        for team in &mut teams {
            team.reset_roster();
        }

        self.pool_size = players.len();
        self.available = players;
        self.teams = teams;
        self.draft_order = draft_order;
        self.current_pick = 1;
        self.drafted.clear();
        self.state = SessionState::Active;
        self.is_user_turn = self.owner_is_user(self.current_pick);

        info!(
            "Draft initialized: {} players, {} teams, {} picks",
            self.pool_size,
            self.teams.len(),
            self.draft_order.len()
        );
        Ok(())
    }

    /// Commit a pick.
    ///
    /// The player moves from the available pool to `team_id`'s roster, the
    /// team's needs are recomputed and the pick pointer advances. Rejected
    /// calls leave the session untouched.
    pub fn make_pick(
        &mut self,
        player_id: PlayerId,
        team_id: TeamId,
    ) -> Result<&DraftedPlayer, DraftError> {
        if self.state != SessionState::Active {
            return Err(DraftError::SessionNotActive);
        }
        let team_idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(DraftError::UnknownTeam(team_id))?;
        let player_idx = self
            .available
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(DraftError::PlayerNotAvailable(player_id))?;

        let player = self.available.remove(player_idx);
        self.teams[team_idx].add_player(Arc::clone(&player));

        let pick_number = self.current_pick;
        let round = self.round_of(pick_number);
        debug!(
            "Pick {} (round {}): {} -> {}",
            pick_number, round, player.name, self.teams[team_idx].name
        );
        self.drafted.push(DraftedPlayer {
            pick_number,
            round,
            player,
            team_id,
        });

        self.current_pick += 1;
        self.is_user_turn = self.owner_is_user(self.current_pick);
        if self.current_pick > self.draft_order.len() {
            self.state = SessionState::Complete;
            info!("Draft complete after {} picks", self.draft_order.len());
        }

        // Just pushed above.
        Ok(&self.drafted[self.drafted.len() - 1])
    }

    fn owner_is_user(&self, pick: usize) -> bool {
        pick.checked_sub(1)
            .and_then(|idx| self.draft_order.get(idx))
            .and_then(|id| self.team(*id))
            .is_some_and(|t| t.is_user)
    }

    fn round_of(&self, pick: usize) -> usize {
        let per_round = self.teams.len().max(1);
        (pick.saturating_sub(1)) / per_round + 1
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// True once the pick pointer has moved past the end of the draft order.
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn is_user_turn(&self) -> bool {
        self.is_user_turn
    }

    /// The 1-based pick pointer (0 before initialization).
    pub fn current_pick(&self) -> usize {
        self.current_pick
    }

    /// Round of the current pick, `None` unless active.
    pub fn current_round(&self) -> Option<usize> {
        self.is_active().then(|| self.round_of(self.current_pick))
    }

    /// Position of the current pick within its round (1-indexed).
    pub fn pick_in_round(&self) -> Option<usize> {
        let per_round = self.teams.len().max(1);
        self.is_active()
            .then(|| (self.current_pick - 1) % per_round + 1)
    }

    /// Team owning the current pick, `None` unless active.
    pub fn team_on_clock(&self) -> Option<&Team> {
        if !self.is_active() {
            return None;
        }
        self.draft_order
            .get(self.current_pick - 1)
            .and_then(|id| self.team(*id))
    }

    pub fn total_picks(&self) -> usize {
        self.draft_order.len()
    }

    pub fn picks_remaining(&self) -> usize {
        (self.draft_order.len() + 1).saturating_sub(self.current_pick.max(1))
    }

    pub fn draft_order(&self) -> &[TeamId] {
        &self.draft_order
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn user_team(&self) -> Option<&Team> {
        self.teams.iter().find(|t| t.is_user)
    }

    /// Undrafted players, in the order they were supplied.
    pub fn available_players(&self) -> &[Arc<Player>] {
        &self.available
    }

    pub fn is_available(&self, player_id: PlayerId) -> bool {
        self.available.iter().any(|p| p.id == player_id)
    }

    pub fn drafted_players(&self) -> &[DraftedPlayer] {
        &self.drafted
    }

    /// Number of players supplied to `initialize`.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::Position;

    fn pool(n: u32) -> Vec<Arc<Player>> {
        (1..=n)
            .map(|i| {
                let pos = Position::ALL[(i as usize - 1) % 5];
                Arc::new(Player::new(i, &format!("Player {i}"), pos, (99 - i) as u8))
            })
            .collect()
    }

    fn teams(n: u32, rounds: u32) -> Vec<Team> {
        (1..=n)
            .map(|i| Team::new(i, &format!("Team {i}"), i == 1, rounds))
            .collect()
    }

    fn linear_order(teams: u32, rounds: u32) -> Vec<TeamId> {
        (0..rounds).flat_map(|_| 1..=teams).collect()
    }

    fn active_session() -> DraftSession {
        let mut session = DraftSession::new();
        session
            .initialize(pool(20), teams(3, 2), linear_order(3, 2))
            .unwrap();
        session
    }

    fn rostered(session: &DraftSession) -> usize {
        session.teams().iter().map(|t| t.roster.len()).sum()
    }

    #[test]
    fn new_session_is_uninitialized() {
        let session = DraftSession::new();
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert_eq!(session.current_pick(), 0);
        assert!(session.team_on_clock().is_none());
        assert!(!session.is_user_turn());
    }

    #[test]
    fn make_pick_before_initialize_rejected() {
        let mut session = DraftSession::new();
        assert_eq!(
            session.make_pick(1, 1).unwrap_err(),
            DraftError::SessionNotActive
        );
    }

    #[test]
    fn initialize_sets_pointer_and_turn() {
        let session = active_session();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.current_pick(), 1);
        assert!(session.is_user_turn());
        assert_eq!(session.available_players().len(), 20);
        assert_eq!(session.pool_size(), 20);
        assert_eq!(session.total_picks(), 6);
        assert_eq!(session.current_round(), Some(1));
        assert_eq!(session.pick_in_round(), Some(1));
        assert_eq!(session.team_on_clock().unwrap().id, 1);
    }

    #[test]
    fn initialize_with_ai_first_is_not_user_turn() {
        let mut session = DraftSession::new();
        session.initialize(pool(10), teams(3, 1), vec![2, 3, 1]).unwrap();
        assert!(!session.is_user_turn());
    }

    #[test]
    fn initialize_clears_existing_rosters() {
        let mut stale = teams(2, 1);
        stale[0].add_player(Arc::new(Player::new(99, "Stale", Position::Center, 70)));
        let mut session = DraftSession::new();
        session.initialize(pool(4), stale, vec![1, 2]).unwrap();
        assert!(session.teams().iter().all(|t| t.roster.is_empty()));
    }

    #[test]
    fn initialize_validation() {
        let mut session = DraftSession::new();
        assert!(matches!(
            session.initialize(pool(4), teams(2, 1), vec![]),
            Err(DraftError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            session.initialize(pool(4), teams(2, 1), vec![1, 3]),
            Err(DraftError::InvalidConfiguration(_))
        ));
        let no_user: Vec<Team> = (1..=2).map(|i| Team::new(i, "AI", false, 1)).collect();
        assert!(matches!(
            session.initialize(pool(4), no_user, vec![1, 2]),
            Err(DraftError::InvalidConfiguration(_))
        ));
        let mut dup = pool(3);
        dup.push(Arc::clone(&dup[0]));
        assert!(matches!(
            session.initialize(dup, teams(2, 1), vec![1, 2]),
            Err(DraftError::InvalidConfiguration(_))
        ));
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn make_pick_moves_player_to_roster() {
        let mut session = active_session();
        let drafted = session.make_pick(5, 1).unwrap();
        assert_eq!(drafted.pick_number, 1);
        assert_eq!(drafted.round, 1);
        assert_eq!(drafted.player.id, 5);
        assert_eq!(drafted.team_id, 1);

        assert!(!session.is_available(5));
        assert_eq!(session.available_players().len(), 19);
        let team = session.team(1).unwrap();
        assert!(team.has_player(5));
        // Player 5 is a center (index 4 in the rotation).
        assert_eq!(team.needs.get(Position::Center).unwrap().current, 1.0);
        assert_eq!(session.current_pick(), 2);
        assert!(!session.is_user_turn());
        assert_eq!(session.drafted_players().len(), 1);
    }

    #[test]
    fn same_player_twice_is_rejected() {
        let mut session = active_session();
        session.make_pick(3, 1).unwrap();
        let before_pick = session.current_pick();
        let err = session.make_pick(3, 2).unwrap_err();
        assert_eq!(err, DraftError::PlayerNotAvailable(3));
        assert_eq!(session.current_pick(), before_pick);
        assert_eq!(session.available_players().len(), 19);
    }

    #[test]
    fn unknown_player_and_team_rejected_without_change() {
        let mut session = active_session();
        assert_eq!(
            session.make_pick(999, 1).unwrap_err(),
            DraftError::PlayerNotAvailable(999)
        );
        assert_eq!(
            session.make_pick(1, 42).unwrap_err(),
            DraftError::UnknownTeam(42)
        );
        assert_eq!(session.current_pick(), 1);
        assert_eq!(session.available_players().len(), 20);
        assert_eq!(rostered(&session), 0);
    }

    #[test]
    fn pool_is_conserved_and_completes_exactly_at_end() {
        let mut session = active_session();
        let order = session.draft_order().to_vec();
        for (i, team_id) in order.iter().enumerate() {
            assert!(!session.is_complete());
            let before = session.available_players().len();
            let player_id = session.available_players()[0].id;
            session.make_pick(player_id, *team_id).unwrap();

            assert_eq!(session.available_players().len(), before - 1);
            assert_eq!(
                rostered(&session) + session.available_players().len(),
                session.pool_size()
            );
            assert_eq!(session.current_pick(), i + 2);
        }
        assert!(session.is_complete());
        assert_eq!(session.current_pick(), session.total_picks() + 1);
        assert!(!session.is_user_turn());
        assert!(session.team_on_clock().is_none());
        assert_eq!(session.picks_remaining(), 0);

        let player_id = session.available_players()[0].id;
        assert_eq!(
            session.make_pick(player_id, 1).unwrap_err(),
            DraftError::SessionNotActive
        );
    }

    #[test]
    fn rounds_advance_with_picks() {
        let mut session = active_session();
        for _ in 0..3 {
            let id = session.available_players()[0].id;
            let team = session.team_on_clock().unwrap().id;
            session.make_pick(id, team).unwrap();
        }
        assert_eq!(session.current_round(), Some(2));
        assert_eq!(session.pick_in_round(), Some(1));
        assert!(session.is_user_turn());
        assert_eq!(session.drafted_players()[2].round, 1);
    }

    #[test]
    fn reinitialize_resets_everything() {
        let mut session = active_session();
        session.make_pick(1, 1).unwrap();
        session.make_pick(2, 2).unwrap();
        session
            .initialize(pool(20), teams(3, 2), linear_order(3, 2))
            .unwrap();
        assert_eq!(session.current_pick(), 1);
        assert!(session.drafted_players().is_empty());
        assert_eq!(rostered(&session), 0);
        assert_eq!(session.available_players().len(), 20);
    }
}
