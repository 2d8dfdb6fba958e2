// Turn advancement: one AI pick per call, no wall-clock delays.

use rand::Rng;
use tracing::{info, warn};

use crate::ai::AiPickPolicy;
use crate::error::DraftError;
use crate::session::{DraftSession, DraftedPlayer};

/// Result of a single `advance_turn` call.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// An AI team made this pick.
    AiPicked(DraftedPlayer),
    /// The user is on the clock; nothing changed.
    UserOnClock,
    /// Every pick in the draft order has been made.
    Complete,
    /// An AI team was on the clock but the pool is empty. Callers treat
    /// this as the end of the draft.
    PoolExhausted,
}

impl TurnOutcome {
    /// True when no further picks can be made.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnOutcome::Complete | TurnOutcome::PoolExhausted)
    }
}

/// Resolve the current turn.
///
/// When an AI team is on the clock it makes exactly one pick through
/// `policy`. Otherwise the session is left unchanged.
pub fn advance_turn<R: Rng + ?Sized>(
    session: &mut DraftSession,
    policy: &AiPickPolicy,
    rng: &mut R,
) -> Result<TurnOutcome, DraftError> {
    if session.is_complete() {
        return Ok(TurnOutcome::Complete);
    }
    let team = session.team_on_clock().ok_or(DraftError::SessionNotActive)?;
    if team.is_user {
        return Ok(TurnOutcome::UserOnClock);
    }
    let team_id = team.id;

    let player = match policy.select(&team.needs, session.available_players(), rng) {
        Ok(player) => player,
        Err(DraftError::NoAvailablePlayers) => {
            warn!(
                "Player pool exhausted at pick {} of {}",
                session.current_pick(),
                session.total_picks()
            );
            return Ok(TurnOutcome::PoolExhausted);
        }
        Err(e) => return Err(e),
    };

    let drafted = session.make_pick(player.id, team_id)?.clone();
    if session.is_complete() {
        info!("Final pick made by team {}", team_id);
    }
    Ok(TurnOutcome::AiPicked(drafted))
}

/// Run AI turns until the user is on the clock or the draft ends.
///
/// Returns the AI picks made along the way and the outcome that stopped
/// the loop.
pub fn run_until_user_turn<R: Rng + ?Sized>(
    session: &mut DraftSession,
    policy: &AiPickPolicy,
    rng: &mut R,
) -> Result<(Vec<DraftedPlayer>, TurnOutcome), DraftError> {
    let mut picks = Vec::new();
    loop {
        match advance_turn(session, policy, rng)? {
            TurnOutcome::AiPicked(pick) => picks.push(pick),
            outcome => return Ok((picks, outcome)),
        }
    }
}
