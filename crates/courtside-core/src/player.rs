// Canonical player entity and its attribute groups.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Unique player identifier within a catalog pool.
pub type PlayerId = u32;

/// Height used when a record carries no parseable height (6'0").
pub const DEFAULT_HEIGHT_INCHES: u32 = 72;

// ---------------------------------------------------------------------------
// Attribute groups
// ---------------------------------------------------------------------------

// All ratings are on the 0-99 video-game scale. They are stored as f64
// because every consumer feeds them into weighted formulas.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsideScoring {
    pub close_shot: f64,
    pub layup: f64,
    pub standing_dunk: f64,
    pub driving_dunk: f64,
    pub post_control: f64,
    pub post_hook: f64,
    pub post_fade: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shooting {
    pub mid_range: f64,
    pub three_point: f64,
    pub free_throw: f64,
    pub shot_iq: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playmaking {
    pub pass_accuracy: f64,
    pub ball_handle: f64,
    pub speed_with_ball: f64,
    pub pass_iq: f64,
    pub pass_vision: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defense {
    pub interior: f64,
    pub perimeter: f64,
    pub steal: f64,
    pub block: f64,
    pub defensive_rebound: f64,
    pub offensive_rebound: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Athleticism {
    pub speed: f64,
    pub agility: f64,
    pub strength: f64,
    pub vertical: f64,
    pub stamina: f64,
    pub hustle: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intangibles {
    pub offensive_consistency: f64,
    pub defensive_consistency: f64,
    pub help_defense_iq: f64,
    pub durability: f64,
}

/// Badge counts: per tier and per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Badges {
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
    pub purple: u32,
    pub legendary: u32,
    pub inside_scoring: u32,
    pub outside_scoring: u32,
    pub playmaking: u32,
    pub defensive: u32,
    pub rebounding: u32,
    pub total: u32,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A draftable player. Immutable once loaded; rosters hold `Arc<Player>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Real-world team label from the dataset (display only).
    #[serde(default)]
    pub team: String,
    pub height_inches: u32,
    pub primary_position: Position,
    pub secondary_position: Option<Position>,
    pub overall_rating: u8,
    pub inside_scoring: InsideScoring,
    pub shooting: Shooting,
    pub playmaking: Playmaking,
    pub defense: Defense,
    pub athleticism: Athleticism,
    pub intangibles: Intangibles,
    #[serde(default)]
    pub badges: Badges,
}

impl Player {
    /// Create a player with zeroed attributes and default height.
    pub fn new(id: PlayerId, name: &str, primary_position: Position, overall_rating: u8) -> Self {
        Player {
            id,
            name: name.to_string(),
            team: String::new(),
            height_inches: DEFAULT_HEIGHT_INCHES,
            primary_position,
            secondary_position: None,
            overall_rating: overall_rating.min(99),
            inside_scoring: InsideScoring::default(),
            shooting: Shooting::default(),
            playmaking: Playmaking::default(),
            defense: Defense::default(),
            athleticism: Athleticism::default(),
            intangibles: Intangibles::default(),
            badges: Badges::default(),
        }
    }

    /// Set the secondary position. A secondary equal to the primary is dropped.
    pub fn with_secondary(mut self, secondary: Position) -> Self {
        self.secondary_position = (secondary != self.primary_position).then_some(secondary);
        self
    }

    pub fn with_height(mut self, height_inches: u32) -> Self {
        self.height_inches = height_inches;
        self
    }

    /// Set every attribute in all six groups to the same rating.
    pub fn with_uniform_attributes(mut self, rating: f64) -> Self {
        let r = rating.clamp(0.0, 99.0);
        self.inside_scoring = InsideScoring {
            close_shot: r,
            layup: r,
            standing_dunk: r,
            driving_dunk: r,
            post_control: r,
            post_hook: r,
            post_fade: r,
        };
        self.shooting = Shooting {
            mid_range: r,
            three_point: r,
            free_throw: r,
            shot_iq: r,
        };
        self.playmaking = Playmaking {
            pass_accuracy: r,
            ball_handle: r,
            speed_with_ball: r,
            pass_iq: r,
            pass_vision: r,
        };
        self.defense = Defense {
            interior: r,
            perimeter: r,
            steal: r,
            block: r,
            defensive_rebound: r,
            offensive_rebound: r,
        };
        self.athleticism = Athleticism {
            speed: r,
            agility: r,
            strength: r,
            vertical: r,
            stamina: r,
            hustle: r,
        };
        self.intangibles = Intangibles {
            offensive_consistency: r,
            defensive_consistency: r,
            help_defense_iq: r,
            durability: r,
        };
        self
    }

    /// The positions this player can play: primary first, then secondary.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.primary_position).chain(self.secondary_position)
    }

    /// Whether the player lists `pos` as primary or secondary position.
    pub fn plays(&self, pos: Position) -> bool {
        self.primary_position == pos || self.secondary_position == Some(pos)
    }

    pub fn is_single_position(&self) -> bool {
        self.secondary_position.is_none()
    }

    /// "PG" or "PG/SG" style label.
    pub fn position_label(&self) -> String {
        match self.secondary_position {
            Some(sec) => format!("{}/{}", self.primary_position, sec),
            None => self.primary_position.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Height parsing
// ---------------------------------------------------------------------------

/// Parse a feet/inches height string into total inches.
///
/// Handles `6'9"`, `6'9`, `6' 9"`, `7'` and `6-9`. Returns `None` for
/// anything else.
pub fn parse_height_inches(s: &str) -> Option<u32> {
    let cleaned = s.trim().trim_end_matches('"').trim_end_matches("''");
    let (feet, inches) = cleaned
        .split_once('\'')
        .or_else(|| cleaned.split_once('-'))
        .unwrap_or((cleaned, ""));

    let feet: u32 = feet.trim().parse().ok()?;
    let inches: u32 = match inches.trim() {
        "" => 0,
        other => other.parse().ok()?,
    };
    if inches >= 12 || !(4..=8).contains(&feet) {
        return None;
    }
    Some(feet * 12 + inches)
}
