// Library root: player model, team construction and the player catalog.
//
// Everything here is data shared by the draft engine (`courtside-draft`) and
// the evaluation engine (`courtside-eval`).

pub mod catalog;
pub mod player;
pub mod position;
pub mod team;

pub use catalog::{CatalogError, PlayerCatalog, PoolSelector};
pub use player::{Player, PlayerId};
pub use position::Position;
pub use team::{PositionNeed, Team, TeamError, TeamId, TeamNeeds, USER_TEAM_ID};
