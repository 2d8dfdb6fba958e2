// AI pick policy: need-driven candidate filter plus jittered rating.

use std::sync::Arc;

use courtside_core::{Player, Position, TeamNeeds};
use rand::Rng;
use tracing::trace;

use crate::error::DraftError;

/// Default jitter amplitude applied to overall ratings.
pub const DEFAULT_JITTER: f64 = 5.0;

/// How AI teams choose a player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiPickPolicy {
    /// Half-width of the uniform noise added to each rating. Zero makes
    /// selection fully deterministic.
    pub jitter: f64,
}

impl Default for AiPickPolicy {
    fn default() -> Self {
        AiPickPolicy {
            jitter: DEFAULT_JITTER,
        }
    }
}

impl AiPickPolicy {
    pub fn new(jitter: f64) -> Self {
        AiPickPolicy {
            jitter: if jitter.is_finite() { jitter.abs() } else { 0.0 },
        }
    }

    /// Players playing (primary or secondary) a position with positive
    /// priority. Falls back to the whole pool when nobody qualifies.
    pub fn candidates<'a>(
        &self,
        needs: &TeamNeeds,
        available: &'a [Arc<Player>],
    ) -> Vec<&'a Arc<Player>> {
        let wanted: Vec<Position> = needs
            .priorities()
            .into_iter()
            .filter(|(_, priority)| *priority > 0.0)
            .map(|(pos, _)| pos)
            .collect();

        let filtered: Vec<&Arc<Player>> = available
            .iter()
            .filter(|p| wanted.iter().any(|&pos| p.plays(pos)))
            .collect();

        if filtered.is_empty() {
            available.iter().collect()
        } else {
            filtered
        }
    }

    /// Choose a player for a team with `needs`.
    ///
    /// Among the candidates the highest `overall_rating + U(-jitter, jitter)`
    /// wins; on equal keys the earlier player in `available` is kept.
    pub fn select<R: Rng + ?Sized>(
        &self,
        needs: &TeamNeeds,
        available: &[Arc<Player>],
        rng: &mut R,
    ) -> Result<Arc<Player>, DraftError> {
        if available.is_empty() {
            return Err(DraftError::NoAvailablePlayers);
        }

        let mut best: Option<(&Arc<Player>, f64)> = None;
        for player in self.candidates(needs, available) {
            let key = f64::from(player.overall_rating) + self.noise(rng);
            match best {
                Some((_, best_key)) if key <= best_key => {}
                _ => best = Some((player, key)),
            }
        }

        let (player, key) = best.ok_or(DraftError::NoAvailablePlayers)?;
        trace!("AI selected {} (key {:.2})", player.name, key);
        Ok(Arc::clone(player))
    }

    fn noise<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.jitter > 0.0 {
            rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        }
    }
}
