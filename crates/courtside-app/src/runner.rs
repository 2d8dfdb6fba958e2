// Draft runner: wires config, session, AI turns and user picks together,
// then ranks every team's roster.

use std::sync::Arc;

use courtside_core::team::build_teams;
use courtside_core::{Player, PlayerId, TeamId};
use courtside_draft::{
    generate_draft_order, run_until_user_turn, AiPickPolicy, DraftError, DraftOrderConfig,
    DraftSession, DraftedPlayer, TurnOutcome,
};
use courtside_eval::{score_roster, RosterEvaluation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::config::DraftSettings;

// ---------------------------------------------------------------------------
// User input seam
// ---------------------------------------------------------------------------

/// Source of the user's picks.
pub trait UserPicker {
    /// Choose a player from `session.available_players()`, or `None` to
    /// abandon the draft.
    fn pick(&mut self, session: &DraftSession) -> Option<PlayerId>;

    /// Called after every AI pick.
    fn ai_picked(&mut self, _session: &DraftSession, _pick: &DraftedPlayer) {}
}

/// Always takes the highest-rated available player.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestAvailablePicker;

impl UserPicker for BestAvailablePicker {
    fn pick(&mut self, session: &DraftSession) -> Option<PlayerId> {
        session
            .available_players()
            .iter()
            .max_by_key(|p| p.overall_rating)
            .map(|p| p.id)
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOutcome {
    Completed,
    PoolExhausted,
    /// The user walked away mid-draft.
    Abandoned,
}

/// A team's final roster score.
#[derive(Debug, Clone)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub is_user: bool,
    pub evaluation: RosterEvaluation,
}

pub struct DraftRunner {
    session: DraftSession,
    policy: AiPickPolicy,
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl DraftRunner {
    /// Build teams and the pick order from `settings` and start a session
    /// over `players`.
    pub fn new(settings: &DraftSettings, players: Vec<Arc<Player>>) -> Result<Self, DraftError> {
        let mut rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let teams = build_teams(
            settings.rounds,
            settings.ai_team_count,
            &settings.user_team_name,
            &mut rng,
        )?;
        let order_config = DraftOrderConfig {
            rounds: settings.rounds,
            draft_type: settings.draft_type,
            user_position: settings.user_draft_position,
        };
        let order = generate_draft_order(&order_config, &teams, &mut rng)?;

        let mut session = DraftSession::new();
        session.initialize(players, teams, order)?;
        info!(
            "Draft ready: {:?} order, {} rounds, {} AI teams, seed {:?}",
            settings.draft_type, settings.rounds, settings.ai_team_count, settings.seed
        );

        Ok(DraftRunner {
            session,
            policy: AiPickPolicy::new(settings.ai_jitter),
            rng,
            seed: settings.seed,
        })
    }

    pub fn session(&self) -> &DraftSession {
        &self.session
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Alternate AI turns and user picks until the draft ends or the user
    /// abandons it.
    pub fn run<P: UserPicker + ?Sized>(
        &mut self,
        picker: &mut P,
    ) -> Result<DraftOutcome, DraftError> {
        loop {
            let (picks, outcome) =
                run_until_user_turn(&mut self.session, &self.policy, &mut self.rng)?;
            for pick in &picks {
                picker.ai_picked(&self.session, pick);
            }

            match outcome {
                TurnOutcome::Complete => {
                    info!("Draft complete after {} picks", self.session.drafted_players().len());
                    return Ok(DraftOutcome::Completed);
                }
                TurnOutcome::PoolExhausted => return Ok(DraftOutcome::PoolExhausted),
                TurnOutcome::AiPicked(_) => continue,
                TurnOutcome::UserOnClock => {}
            }

            if self.session.available_players().is_empty() {
                warn!(
                    "Player pool exhausted with the user on the clock at pick {}",
                    self.session.current_pick()
                );
                return Ok(DraftOutcome::PoolExhausted);
            }

            let Some(player_id) = picker.pick(&self.session) else {
                info!(
                    "User abandoned the draft at pick {}",
                    self.session.current_pick()
                );
                return Ok(DraftOutcome::Abandoned);
            };
            let team_id = self
                .session
                .user_team()
                .map(|t| t.id)
                .ok_or(DraftError::SessionNotActive)?;
            self.session.make_pick(player_id, team_id)?;
        }
    }

    /// Score every roster, best first. Ties keep team order.
    pub fn standings(&self) -> Vec<TeamStanding> {
        let mut standings: Vec<TeamStanding> = self
            .session
            .teams()
            .iter()
            .map(|team| TeamStanding {
                team_id: team.id,
                name: team.name.clone(),
                is_user: team.is_user,
                evaluation: score_roster(&team.roster),
            })
            .collect();
        standings.sort_by(|a, b| b.evaluation.score.cmp(&a.evaluation.score));
        standings
    }
}
