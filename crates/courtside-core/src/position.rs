// Basketball positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five positional slots of a basketball lineup.
///
/// Variant order is the canonical lineup order (PG first, C last), which is
/// also the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

impl Position {
    /// All positions in canonical lineup order.
    pub const ALL: [Position; 5] = [
        Position::PointGuard,
        Position::ShootingGuard,
        Position::SmallForward,
        Position::PowerForward,
        Position::Center,
    ];

    /// Parse a position string into a Position enum.
    ///
    /// Accepts the two-letter codes ("PG", "sf", ...) as well as the long
    /// names used by some data dumps ("Point Guard", "Center").
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PG" | "POINT GUARD" => Some(Position::PointGuard),
            "SG" | "SHOOTING GUARD" => Some(Position::ShootingGuard),
            "SF" | "SMALL FORWARD" => Some(Position::SmallForward),
            "PF" | "POWER FORWARD" => Some(Position::PowerForward),
            "C" | "CENTER" | "CENTRE" => Some(Position::Center),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }

    /// Index into per-position arrays (0 = PG ... 4 = C).
    pub fn index(&self) -> usize {
        match self {
            Position::PointGuard => 0,
            Position::ShootingGuard => 1,
            Position::SmallForward => 2,
            Position::PowerForward => 3,
            Position::Center => 4,
        }
    }

    /// Whether this is a backcourt (guard) position.
    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PointGuard | Position::ShootingGuard)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}
