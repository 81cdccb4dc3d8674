//! Tile records exchanged between import parsing, the matcher and the tile store.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Where a tile is played.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Online,
    Local,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Online => "online",
            GameMode::Local => "local",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(GameMode::Online),
            "local" => Ok(GameMode::Local),
            _ => Err(format!("Unknown game mode: {s}")),
        }
    }
}

/// A tile description produced while parsing an import. Never persisted by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TileCandidate {
    #[serde(default)]
    pub group: String,
    #[serde(rename = "group_id", default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub intensity: Option<i64>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub game_mode: Option<GameMode>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_flag",
        serialize_with = "serialize_flag"
    )]
    pub is_enabled: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_flag",
        serialize_with = "serialize_flag"
    )]
    pub is_custom: bool,
}

impl TileCandidate {
    /// The `group_id` when present and non-empty.
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn has_group_id(&self) -> bool {
        self.group_id().is_some()
    }
}

/// A tile owned by the store. Defaults are already applied to every identity field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredTile {
    pub id: i64,
    pub group: String,
    #[serde(rename = "group_id")]
    pub group_id: String,
    pub intensity: i64,
    pub action: String,
    pub game_mode: GameMode,
    pub locale: String,
    pub tags: Vec<String>,
    #[serde(deserialize_with = "deserialize_flag", serialize_with = "serialize_flag")]
    pub is_enabled: bool,
    #[serde(deserialize_with = "deserialize_flag", serialize_with = "serialize_flag")]
    pub is_custom: bool,
}

impl StoredTile {
    pub fn as_candidate(&self) -> TileCandidate {
        TileCandidate {
            group: self.group.clone(),
            group_id: Some(self.group_id.clone()),
            intensity: Some(self.intensity),
            action: self.action.clone(),
            game_mode: Some(self.game_mode),
            locale: Some(self.locale.clone()),
            tags: self.tags.clone(),
            is_enabled: self.is_enabled,
            is_custom: self.is_custom,
        }
    }
}

/// Composite identity: `group_id|intensity|action|gameMode|locale`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchKey(String);

impl MatchKey {
    pub(crate) fn new(raw: String) -> Self {
        MatchKey(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read filter for the tile store. Set fields combine with AND; `None` is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileFilter {
    #[serde(rename = "group_id")]
    pub group_id: Option<String>,
    pub intensity: Option<i64>,
    pub action: Option<String>,
    pub game_mode: Option<GameMode>,
    pub locale: Option<String>,
}

impl TileFilter {
    pub fn by_group_id(group_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub existing_tile: Option<StoredTile>,
    pub is_exact_match: bool,
    pub match_key: MatchKey,
}

impl MatchResult {
    pub(crate) fn new(existing_tile: Option<StoredTile>, match_key: MatchKey) -> Self {
        Self {
            is_exact_match: existing_tile.is_some(),
            existing_tile,
            match_key,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchingError {
    pub tile: TileCandidate,
    pub error: String,
}

/// Diagnostics over a whole import set.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchingStats {
    pub total_tiles: usize,
    pub tiles_with_group_id: usize,
    pub tiles_missing_group_id: usize,
    pub duplicate_keys: Vec<MatchKey>,
    pub matching_errors: Vec<MatchingError>,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(serde::de::Error::custom(format!(
            "expected 0 or 1, got {other}"
        ))),
    }
}

fn serialize_flag<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

#[cfg(test)]
#[path = "tests/tile_tests.rs"]
mod tests;
