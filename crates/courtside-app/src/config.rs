// Configuration loading and parsing (config/draft.toml).

use courtside_core::PoolSelector;
use courtside_draft::{DraftType, UserDraftPosition};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Shipped defaults, written into the user config directory when neither
/// `config/` nor `defaults/` exists next to the binary.
const EMBEDDED_DRAFT_TOML: &str = include_str!("../defaults/draft.toml");
const EMBEDDED_CURRENT_POOL: &str = include_str!("../data/current_players.csv");
const EMBEDDED_ALL_TIME_POOL: &str = include_str!("../data/all_time_players.csv");

/// Largest AI field: 30 franchises less the user's.
pub const MAX_AI_TEAMS: usize = 29;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub draft: DraftSettings,
    pub data: DataPaths,
    /// Directory the config was loaded from; relative data paths resolve
    /// against it.
    pub base_dir: PathBuf,
}

impl Config {
    /// Absolute path of the current-season pool file.
    pub fn current_pool_path(&self) -> PathBuf {
        self.base_dir.join(&self.data.current)
    }

    /// Absolute path of the all-time pool file, if configured.
    pub fn all_time_pool_path(&self) -> Option<PathBuf> {
        self.data.all_time.as_ref().map(|p| self.base_dir.join(p))
    }

    /// All-time pool file to load for the selected pool; `None` when the
    /// draft only uses current players.
    pub fn required_all_time_path(&self) -> Option<PathBuf> {
        if uses_all_time(self.draft.player_pool) {
            self.all_time_pool_path()
        } else {
            None
        }
    }
}

fn uses_all_time(pool: PoolSelector) -> bool {
    matches!(pool, PoolSelector::AllTime | PoolSelector::Combined)
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    draft: DraftSettings,
    #[serde(default)]
    data: DataPaths,
}

/// The `[draft]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DraftSettings {
    pub rounds: u32,
    pub ai_team_count: usize,
    pub draft_type: DraftType,
    pub user_draft_position: UserDraftPosition,
    pub user_team_name: String,
    pub player_pool: PoolSelector,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub ai_jitter: f64,
}

impl Default for DraftSettings {
    fn default() -> Self {
        DraftSettings {
            rounds: 5,
            ai_team_count: 5,
            draft_type: DraftType::Snake,
            user_draft_position: UserDraftPosition::First,
            user_team_name: "Boston Celtics".into(),
            player_pool: PoolSelector::Current,
            seed: None,
            ai_jitter: courtside_draft::ai::DEFAULT_JITTER,
        }
    }
}

/// The `[data]` table. Only `current` has a default path; the all-time
/// pool must be named explicitly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataPaths {
    #[serde(default = "default_current_pool")]
    pub current: PathBuf,
    #[serde(default)]
    pub all_time: Option<PathBuf>,
}

fn default_current_pool() -> PathBuf {
    PathBuf::from("data/current_players.csv")
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            current: default_current_pool(),
            all_time: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draft.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` handles that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let draft_path = base_dir.join("config").join("draft.toml");
    let text = read_file(&draft_path)?;
    let file: DraftFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: draft_path.clone(),
        source: e,
    })?;

    let config = Config {
        draft: file.draft,
        data: file.data,
        base_dir: base_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    create_dir(&config_dir)?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let target = config_dir.join(file_name);
        if write_if_missing(&target, &content)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Seed `base_dir` with the embedded config and player pools.
///
/// Existing files are left alone. Returns the files written.
pub fn install_embedded_defaults(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let files = [
        ("config/draft.toml", EMBEDDED_DRAFT_TOML),
        ("data/current_players.csv", EMBEDDED_CURRENT_POOL),
        ("data/all_time_players.csv", EMBEDDED_ALL_TIME_POOL),
    ];

    let mut written = Vec::new();
    for (relative, content) in files {
        let target = base_dir.join(relative);
        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        if write_if_missing(&target, content.as_bytes())? {
            written.push(target);
        }
    }
    Ok(written)
}

/// Per-user config directory (e.g. `~/.config/courtside` on Linux).
pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "courtside").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Load config relative to the current working directory, copying
/// defaults first. Falls back to the per-user config directory when the
/// working directory has neither `config/` nor `defaults/`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;

    if cwd.join("config").exists() || cwd.join("defaults").exists() {
        ensure_config_files(&cwd)?;
        return load_config_from(&cwd);
    }

    let base = user_config_dir().ok_or_else(|| ConfigError::DefaultsCopyError {
        message: "no config/ or defaults/ in the working directory and no home directory"
            .into(),
    })?;
    let written = install_embedded_defaults(&base)?;
    if !written.is_empty() {
        info!(
            "Installed {} default files into {}",
            written.len(),
            base.display()
        );
    }
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn create_dir(dir: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create directory {}: {e}", dir.display()),
    })
}

/// Write `content` to `target` unless it already exists. Returns whether a
/// file was written.
fn write_if_missing(target: &Path, content: &[u8]) -> Result<bool, ConfigError> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let draft = &config.draft;

    if draft.rounds == 0 {
        return Err(ConfigError::ValidationError {
            field: "draft.rounds".into(),
            message: "must be greater than 0".into(),
        });
    }

    if !(1..=MAX_AI_TEAMS).contains(&draft.ai_team_count) {
        return Err(ConfigError::ValidationError {
            field: "draft.ai_team_count".into(),
            message: format!(
                "must be between 1 and {MAX_AI_TEAMS}, got {}",
                draft.ai_team_count
            ),
        });
    }

    if !draft.ai_jitter.is_finite() || draft.ai_jitter < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "draft.ai_jitter".into(),
            message: format!("must be a finite value >= 0, got {}", draft.ai_jitter),
        });
    }

    if config.data.current.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.current".into(),
            message: "must not be empty".into(),
        });
    }

    let needs_all_time = uses_all_time(draft.player_pool);
    let has_all_time = config
        .data
        .all_time
        .as_ref()
        .is_some_and(|p| !p.as_os_str().is_empty());
    if needs_all_time && !has_all_time {
        return Err(ConfigError::ValidationError {
            field: "data.all_time".into(),
            message: format!("required for player_pool = {:?}", draft.player_pool),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
