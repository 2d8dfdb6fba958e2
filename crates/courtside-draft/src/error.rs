// Draft error taxonomy.

use courtside_core::{PlayerId, TeamError, TeamId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("invalid draft configuration: {0}")]
    InvalidConfiguration(String),

    #[error("player {0} is not available")]
    PlayerNotAvailable(PlayerId),

    #[error("unknown team id {0}")]
    UnknownTeam(TeamId),

    #[error("no available players left to draft")]
    NoAvailablePlayers,

    #[error("draft session is not active")]
    SessionNotActive,
}

impl From<TeamError> for DraftError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::InvalidConfiguration(msg) => DraftError::InvalidConfiguration(msg),
        }
    }
}
