use std::collections::HashMap;

use super::key::create_key;
use super::validator::validate_tile_for_matching;
use crate::types::{MatchKey, MatchingError, MatchingStats, TileCandidate};

/// Aggregate validation and duplication diagnostics over an import set.
///
/// Never fails and never touches storage. `duplicate_keys` lists each repeated
/// key once, in order of first appearance.
pub fn generate_matching_stats(tiles: &[TileCandidate], error_separator: &str) -> MatchingStats {
    let tiles_with_group_id = tiles.iter().filter(|t| t.has_group_id()).count();

    let mut key_counts: HashMap<MatchKey, usize> = HashMap::new();
    let mut key_order: Vec<MatchKey> = Vec::new();
    for key in tiles.iter().filter_map(|tile| create_key(tile).ok()) {
        let count = key_counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            key_order.push(key);
        }
        *count += 1;
    }
    let duplicate_keys: Vec<MatchKey> = key_order
        .into_iter()
        .filter(|key| key_counts.get(key).is_some_and(|&count| count > 1))
        .collect();

    let matching_errors: Vec<MatchingError> = tiles
        .iter()
        .filter_map(|tile| {
            let validation = validate_tile_for_matching(tile);
            (!validation.valid).then(|| MatchingError {
                tile: tile.clone(),
                error: validation.errors.join(error_separator),
            })
        })
        .collect();

    let stats = MatchingStats {
        total_tiles: tiles.len(),
        tiles_with_group_id,
        tiles_missing_group_id: tiles.len() - tiles_with_group_id,
        duplicate_keys,
        matching_errors,
    };

    log::info!(
        "Matching stats: {} tiles, {} missing group_id, {} duplicate keys, {} invalid",
        stats.total_tiles,
        stats.tiles_missing_group_id,
        stats.duplicate_keys.len(),
        stats.matching_errors.len()
    );

    stats
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
