use super::key;
use super::store::TileStore;
use crate::types::{MatchOutcome, MatchResult, TileCandidate};

const MISSING_GROUP_ID: &str = "Cannot match tile without group_id";

/// Resolve one candidate with a single exact-match query.
///
/// Storage errors propagate unchanged; this layer has no retry of its own.
pub async fn find_existing_tile<S: TileStore>(
    store: &S,
    tile: &TileCandidate,
) -> MatchOutcome<MatchResult> {
    let match_key = key::key_or(tile, MISSING_GROUP_ID)?;

    let Some(filter) = key::exact_filter(tile) else {
        log::debug!("Tile '{match_key}' has no intensity, skipping lookup");
        return Ok(MatchResult::new(None, match_key));
    };

    // At most one logical match per key; take the first.
    let existing = store.get_tiles(&filter).await?.into_iter().next();

    Ok(MatchResult::new(existing, match_key))
}

#[cfg(test)]
#[path = "tests/single_tests.rs"]
mod tests;
