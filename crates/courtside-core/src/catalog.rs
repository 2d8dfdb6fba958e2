// Player catalog: loading and normalizing raw player records.
//
// Raw records use the flat camelCase layout of the ratings dump the pools are
// built from (one row per player, `overallAttribute` stored as text, heights
// like 6'9"). The same layout is accepted from JSON arrays and CSV files.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::player::{
    parse_height_inches, Athleticism, Badges, Defense, InsideScoring, Intangibles, Player,
    PlayerId, Playmaking, Shooting, DEFAULT_HEIGHT_INCHES,
};
use crate::position::Position;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Which player pool a draft uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolSelector {
    #[default]
    Current,
    #[serde(alias = "allTime", alias = "alltime")]
    AllTime,
    Combined,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("unsupported player file type: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: String },
}

/// The static player pools a draft can be run against.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    current: Vec<Arc<Player>>,
    all_time: Vec<Arc<Player>>,
}

impl PlayerCatalog {
    pub fn new(current: Vec<Player>, all_time: Vec<Player>) -> Self {
        PlayerCatalog {
            current: current.into_iter().map(Arc::new).collect(),
            all_time: all_time.into_iter().map(Arc::new).collect(),
        }
    }

    /// Load the catalog from pool files. The all-time pool is optional.
    pub fn from_files(current: &Path, all_time: Option<&Path>) -> Result<Self, CatalogError> {
        let current_players = load_pool_file(current)?;
        let all_time_players = match all_time {
            Some(path) => load_pool_file(path)?,
            None => Vec::new(),
        };
        info!(
            "Loaded catalog: {} current, {} all-time players",
            current_players.len(),
            all_time_players.len()
        );
        Ok(Self::new(current_players, all_time_players))
    }

    /// Players of the selected pool, sorted descending by overall rating.
    ///
    /// Colliding ids (typically all-time records in the combined pool) are
    /// re-numbered so every id in the returned list is unique.
    pub fn players(&self, pool: PoolSelector) -> Vec<Arc<Player>> {
        let selected: Vec<Arc<Player>> = match pool {
            PoolSelector::Current => self.current.clone(),
            PoolSelector::AllTime => self.all_time.clone(),
            PoolSelector::Combined => {
                let mut combined = self.current.clone();
                combined.extend(self.all_time.iter().cloned());
                combined
            }
        };
        let mut players = dedupe_ids(selected);
        // Stable sort keeps file order among equal ratings.
        players.sort_by(|a, b| b.overall_rating.cmp(&a.overall_rating));
        players
    }
}

/// Re-number players whose id was already seen, counting up from the max id.
fn dedupe_ids(players: Vec<Arc<Player>>) -> Vec<Arc<Player>> {
    let mut next_id = players.iter().map(|p| p.id).max().unwrap_or(0);
    let mut seen: HashSet<PlayerId> = HashSet::new();
    players
        .into_iter()
        .map(|p| {
            if seen.insert(p.id) {
                p
            } else {
                next_id += 1;
                seen.insert(next_id);
                let mut renumbered = (*p).clone();
                renumbered.id = next_id;
                Arc::new(renumbered)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Raw record (private)
// ---------------------------------------------------------------------------

/// Overall ratings arrive as text in some dumps and as numbers in others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRating {
    Number(f64),
    Text(String),
}

impl RawRating {
    fn parse(&self) -> Option<u8> {
        let value = match self {
            RawRating::Number(n) => *n,
            RawRating::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (value.is_finite() && value >= 0.0).then(|| value.round().min(99.0) as u8)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayerRecord {
    #[serde(default)]
    id: Option<PlayerId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    height: Option<String>,
    #[serde(default)]
    primary_position: Option<String>,
    #[serde(default)]
    secondary_position: Option<String>,
    #[serde(default)]
    overall_attribute: Option<RawRating>,

    #[serde(default)]
    close_shot: f64,
    #[serde(default)]
    layup: f64,
    #[serde(default)]
    standing_dunk: f64,
    #[serde(default)]
    driving_dunk: f64,
    #[serde(default)]
    post_control: f64,
    #[serde(default)]
    post_hook: f64,
    #[serde(default)]
    post_fade: f64,

    #[serde(default)]
    mid_range_shot: f64,
    #[serde(default)]
    three_point_shot: f64,
    #[serde(default)]
    free_throw: f64,
    #[serde(default, rename = "shotIQ")]
    shot_iq: f64,

    #[serde(default)]
    pass_accuracy: f64,
    #[serde(default)]
    ball_handle: f64,
    #[serde(default)]
    speed_with_ball: f64,
    #[serde(default, rename = "passIQ")]
    pass_iq: f64,
    #[serde(default)]
    pass_vision: f64,

    #[serde(default)]
    interior_defense: f64,
    #[serde(default)]
    perimeter_defense: f64,
    #[serde(default)]
    steal: f64,
    #[serde(default)]
    block: f64,
    #[serde(default)]
    defensive_rebound: f64,
    #[serde(default)]
    offensive_rebound: f64,

    #[serde(default)]
    speed: f64,
    #[serde(default)]
    agility: f64,
    #[serde(default)]
    strength: f64,
    #[serde(default)]
    vertical: f64,
    #[serde(default)]
    stamina: f64,
    #[serde(default)]
    hustle: f64,

    #[serde(default)]
    offensive_consistency: f64,
    #[serde(default)]
    defensive_consistency: f64,
    #[serde(default, rename = "helpDefenseIQ")]
    help_defense_iq: f64,
    #[serde(default)]
    overall_durability: f64,

    #[serde(default)]
    bronze_badges: u32,
    #[serde(default)]
    silver_badges: u32,
    #[serde(default)]
    gold_badges: u32,
    #[serde(default)]
    purple_badges: u32,
    #[serde(default)]
    legendary_badges: u32,
    #[serde(default)]
    inside_scoring_badges: u32,
    #[serde(default)]
    outside_scoring_badges: u32,
    #[serde(default)]
    playmaking_badges: u32,
    #[serde(default)]
    defensive_badges: u32,
    #[serde(default)]
    rebounding_badges: u32,
    #[serde(default)]
    total_badges: Option<u32>,
}

/// Normalize a raw record, or `None` if it lacks a name, a parseable overall
/// rating or a recognizable primary position.
fn normalize(raw: RawPlayerRecord, fallback_id: PlayerId) -> Option<Player> {
    let name = raw.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        warn!("skipping player record #{fallback_id}: missing name");
        return None;
    }

    let Some(overall_rating) = raw.overall_attribute.as_ref().and_then(RawRating::parse) else {
        warn!("skipping player '{name}': missing or unparseable overall rating");
        return None;
    };

    let Some(primary_position) = raw
        .primary_position
        .as_deref()
        .and_then(Position::from_str_pos)
    else {
        warn!("skipping player '{name}': unknown primary position {:?}", raw.primary_position);
        return None;
    };

    let secondary_position = raw
        .secondary_position
        .as_deref()
        .and_then(Position::from_str_pos)
        .filter(|&sec| sec != primary_position);

    let height_inches = match raw.height.as_deref() {
        Some(h) => parse_height_inches(h).unwrap_or_else(|| {
            warn!("player '{name}': unparseable height {h:?}, defaulting to 6'0\"");
            DEFAULT_HEIGHT_INCHES
        }),
        None => DEFAULT_HEIGHT_INCHES,
    };

    let tier_total = raw.bronze_badges
        + raw.silver_badges
        + raw.gold_badges
        + raw.purple_badges
        + raw.legendary_badges;

    Some(Player {
        id: raw.id.unwrap_or(fallback_id),
        name: name.to_string(),
        team: raw.team.unwrap_or_default().trim().to_string(),
        height_inches,
        primary_position,
        secondary_position,
        overall_rating,
        inside_scoring: InsideScoring {
            close_shot: raw.close_shot,
            layup: raw.layup,
            standing_dunk: raw.standing_dunk,
            driving_dunk: raw.driving_dunk,
            post_control: raw.post_control,
            post_hook: raw.post_hook,
            post_fade: raw.post_fade,
        },
        shooting: Shooting {
            mid_range: raw.mid_range_shot,
            three_point: raw.three_point_shot,
            free_throw: raw.free_throw,
            shot_iq: raw.shot_iq,
        },
        playmaking: Playmaking {
            pass_accuracy: raw.pass_accuracy,
            ball_handle: raw.ball_handle,
            speed_with_ball: raw.speed_with_ball,
            pass_iq: raw.pass_iq,
            pass_vision: raw.pass_vision,
        },
        defense: Defense {
            interior: raw.interior_defense,
            perimeter: raw.perimeter_defense,
            steal: raw.steal,
            block: raw.block,
            defensive_rebound: raw.defensive_rebound,
            offensive_rebound: raw.offensive_rebound,
        },
        athleticism: Athleticism {
            speed: raw.speed,
            agility: raw.agility,
            strength: raw.strength,
            vertical: raw.vertical,
            stamina: raw.stamina,
            hustle: raw.hustle,
        },
        intangibles: Intangibles {
            offensive_consistency: raw.offensive_consistency,
            defensive_consistency: raw.defensive_consistency,
            help_defense_iq: raw.help_defense_iq,
            durability: raw.overall_durability,
        },
        badges: Badges {
            bronze: raw.bronze_badges,
            silver: raw.silver_badges,
            gold: raw.gold_badges,
            purple: raw.purple_badges,
            legendary: raw.legendary_badges,
            inside_scoring: raw.inside_scoring_badges,
            outside_scoring: raw.outside_scoring_badges,
            playmaking: raw.playmaking_badges,
            defensive: raw.defensive_badges,
            rebounding: raw.rebounding_badges,
            total: raw.total_badges.unwrap_or(tier_total),
        },
    })
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

/// Load players from a JSON array of raw records.
///
/// Entries that fail to deserialize or normalize are skipped with a warning.
pub fn load_players_from_json_reader<R: Read>(rdr: R) -> Result<Vec<Player>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_reader(rdr)?;
    let mut players = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawPlayerRecord>(value) {
            Ok(raw) => {
                if let Some(player) = normalize(raw, i as PlayerId + 1) {
                    players.push(player);
                }
            }
            Err(e) => warn!("skipping malformed player entry #{}: {}", i + 1, e),
        }
    }
    Ok(players)
}

/// Load players from CSV with a header row of raw record field names.
pub fn load_players_from_csv_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for (i, result) in reader.deserialize::<RawPlayerRecord>().enumerate() {
        match result {
            Ok(raw) => {
                if let Some(player) = normalize(raw, i as PlayerId + 1) {
                    players.push(player);
                }
            }
            Err(e) => warn!("skipping malformed player row: {}", e),
        }
    }
    Ok(players)
}

/// Load a pool file, choosing the format from the file extension.
pub fn load_pool_file(path: &Path) -> Result<Vec<Player>, CatalogError> {
    let display = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
        path: display.clone(),
        source,
    })?;

    match extension.as_deref() {
        Some("json") => load_players_from_json_reader(file).map_err(|source| CatalogError::Json {
            path: display,
            source,
        }),
        Some("csv") => load_players_from_csv_reader(file).map_err(|source| CatalogError::Csv {
            path: display,
            source,
        }),
        _ => Err(CatalogError::UnsupportedFormat { path: display }),
    }
}
