//! Match key derivation.
//!
//! This is the only place that knows the identity defaults. Filters, partition
//! lookups, comparisons and inserts all go through the helpers below.

use crate::types::{
    GameMode, MatchError, MatchKey, MatchOutcome, StoredTile, TileCandidate, TileFilter,
};

pub const DEFAULT_GAME_MODE: GameMode = GameMode::Online;
pub const DEFAULT_LOCALE: &str = "en";

const KEY_SEPARATOR: &str = "|";
const KEY_MISSING_GROUP_ID: &str = "Missing group_id: cannot create match key";

pub fn game_mode_or_default(tile: &TileCandidate) -> GameMode {
    tile.game_mode.unwrap_or(DEFAULT_GAME_MODE)
}

pub fn locale_or_default(tile: &TileCandidate) -> &str {
    tile.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
}

/// Build `group_id|intensity|action|gameMode|locale` for a candidate.
///
/// Fails with [`MatchError::MissingGroupId`] when `group_id` is absent or empty.
/// A missing intensity leaves its segment empty.
pub fn create_key(tile: &TileCandidate) -> MatchOutcome<MatchKey> {
    key_or(tile, KEY_MISSING_GROUP_ID)
}

/// Same as [`create_key`], but reports a missing `group_id` with the caller's message.
pub(crate) fn key_or(tile: &TileCandidate, missing_group_id: &str) -> MatchOutcome<MatchKey> {
    let group_id = tile
        .group_id()
        .ok_or_else(|| MatchError::MissingGroupId(missing_group_id.to_string()))?;

    let intensity = tile.intensity.map(|i| i.to_string()).unwrap_or_default();
    let parts = [
        group_id,
        intensity.as_str(),
        tile.action.as_str(),
        game_mode_or_default(tile).as_str(),
        locale_or_default(tile),
    ];

    Ok(MatchKey::new(parts.join(KEY_SEPARATOR)))
}

/// Exact-match store filter for a candidate, defaults applied.
///
/// `None` when the candidate lacks `group_id` or intensity; such a candidate
/// can never equal a stored tile.
pub fn exact_filter(tile: &TileCandidate) -> Option<TileFilter> {
    let group_id = tile.group_id()?;
    let intensity = tile.intensity?;

    Some(TileFilter {
        group_id: Some(group_id.to_string()),
        intensity: Some(intensity),
        action: Some(tile.action.clone()),
        game_mode: Some(game_mode_or_default(tile)),
        locale: Some(locale_or_default(tile).to_string()),
    })
}

/// Identity fields below `group_id`. Keys the per-partition lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LocalIdentity<'a> {
    intensity: i64,
    action: &'a str,
    game_mode: GameMode,
    locale: &'a str,
}

impl<'a> LocalIdentity<'a> {
    pub(crate) fn of_candidate(tile: &'a TileCandidate) -> Option<Self> {
        Some(Self {
            intensity: tile.intensity?,
            action: &tile.action,
            game_mode: game_mode_or_default(tile),
            locale: locale_or_default(tile),
        })
    }

    pub(crate) fn of_stored(tile: &'a StoredTile) -> Self {
        Self {
            intensity: tile.intensity,
            action: &tile.action,
            game_mode: tile.game_mode,
            locale: &tile.locale,
        }
    }
}

/// Whether two tiles are the same logical entity. The `group` label is ignored.
///
/// Both sides missing `group_id` is an error. Exactly one side missing it
/// compares unequal.
pub fn tiles_equal(a: &TileCandidate, b: &TileCandidate) -> MatchOutcome<bool> {
    match (a.has_group_id(), b.has_group_id()) {
        (false, false) => Err(MatchError::CompareWithoutGroupId),
        (true, true) => Ok(create_key(a)? == create_key(b)?),
        _ => Ok(false),
    }
}

#[cfg(test)]
#[path = "tests/key_tests.rs"]
mod tests;
