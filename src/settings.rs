//! Game configuration
//!
//! Integer settings read from a `key=value` text file (`input.txt`) or
//! from JSON. Missing keys fall back to defaults; they never fail a load.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Screen width when `Width` is absent
pub const DEFAULT_WIDTH: i32 = 1024;
/// Screen height when `Height` is absent
pub const DEFAULT_HEIGHT: i32 = 768;
/// Magazine size when neither `BulletCount` nor `CountTarget` is set
pub const DEFAULT_BULLET_COUNT: i32 = 15;

/// Errors raised while loading settings
#[derive(Debug)]
pub enum SettingsError {
    /// The file could not be read
    Io(std::io::Error),
    /// A `key=value` line had a non-integer value
    InvalidValue { line: usize, key: String, value: String },
    /// The JSON document was malformed
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "can't read settings: {}", e),
            SettingsError::InvalidValue { line, key, value } => {
                write!(f, "line {}: '{}' is not an integer for {}", line, value, key)
            }
            SettingsError::Json(e) => write!(f, "can't parse settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
            SettingsError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Game settings
///
/// Deserializes from a flat integer map so every source applies the same
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", from = "BTreeMap<String, i32>")]
pub struct Settings {
    /// Window width in pixels
    pub width: i32,
    /// Window height in pixels
    pub height: i32,
    /// Number of targets spawned per match
    pub count_target: i32,
    /// Magazine size
    pub bullet_count: i32,
    /// Projectile muzzle speed
    pub speed: i32,
    /// Match duration in seconds
    pub time: i32,
    /// Any other integer keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            count_target: 0,
            bullet_count: DEFAULT_BULLET_COUNT,
            speed: 0,
            time: 0,
            extra: BTreeMap::new(),
        }
    }
}

impl From<BTreeMap<String, i32>> for Settings {
    fn from(map: BTreeMap<String, i32>) -> Self {
        Self::from_map(map)
    }
}

impl Settings {
    /// Build settings from a raw key/value map, applying defaults
    pub fn from_map(mut map: BTreeMap<String, i32>) -> Self {
        let width = map.remove("Width").unwrap_or(DEFAULT_WIDTH);
        let height = map.remove("Height").unwrap_or(DEFAULT_HEIGHT);
        let count_target = map.remove("CountTarget");
        let bullet_count = map
            .remove("BulletCount")
            .or(count_target)
            .unwrap_or(DEFAULT_BULLET_COUNT);

        Self {
            width,
            height,
            count_target: count_target.unwrap_or(0),
            bullet_count,
            speed: map.remove("Speed").unwrap_or(0),
            time: map.remove("Time").unwrap_or(0),
            extra: map,
        }
    }

    /// Parse the `key=value` format.
    ///
    /// Lines without exactly one `=` are skipped; later duplicates are
    /// ignored.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let mut map = BTreeMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            let mut parts = line.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let parsed = value.parse::<i32>().map_err(|_| SettingsError::InvalidValue {
                line: index + 1,
                key: key.to_string(),
                value: value.to_string(),
            })?;
            map.entry(key.to_string()).or_insert(parsed);
        }
        Ok(Self::from_map(map))
    }

    /// Parse a flat JSON object of integers with the same keys
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file; `.json` files are read as JSON
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        let settings = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text)?,
            _ => Self::parse(&text)?,
        };
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up any key by its config name; absent keys read as 0
    pub fn get(&self, name: &str) -> i32 {
        match name {
            "Width" => self.width,
            "Height" => self.height,
            "CountTarget" => self.count_target,
            "BulletCount" => self.bullet_count,
            "Speed" => self.speed,
            "Time" => self.time,
            other => self.extra.get(other).copied().unwrap_or(0),
        }
    }
}
