//! Batch matching: one store query per distinct `group_id`, resolved locally.

use futures_util::stream::{self, StreamExt};
use std::collections::HashMap;

use super::key::{self, LocalIdentity};
use super::single::find_existing_tile;
use super::store::TileStore;
use crate::types::{
    MatchError, MatchKey, MatchOutcome, MatchResult, StoredTile, TileCandidate, TileFilter,
};

const MISSING_GROUP_ID: &str = "Tile missing group_id";

/// Resolve many candidates with one grouped query per `group_id`.
///
/// The whole call fails before any I/O if a single candidate lacks `group_id`.
/// The result holds one entry per distinct [`MatchKey`], so duplicate
/// candidates share an entry. Up to `partition_concurrency` groups are
/// queried at once.
pub async fn batch_find_existing_tiles<S: TileStore>(
    store: &S,
    tiles: &[TileCandidate],
    partition_concurrency: usize,
) -> MatchOutcome<HashMap<MatchKey, MatchResult>> {
    let refs: Vec<&TileCandidate> = tiles.iter().collect();
    batch_find_refs(store, &refs, partition_concurrency).await
}

pub(crate) async fn batch_find_refs<S: TileStore>(
    store: &S,
    tiles: &[&TileCandidate],
    partition_concurrency: usize,
) -> MatchOutcome<HashMap<MatchKey, MatchResult>> {
    let partitions = partition_by_group_id(tiles)?;
    if partitions.is_empty() {
        return Ok(HashMap::new());
    }

    log::debug!(
        "Batch matching {} tiles across {} group partitions",
        tiles.len(),
        partitions.len()
    );

    let mut resolved = stream::iter(partitions)
        .map(|(group_id, members)| resolve_partition(store, group_id, members))
        .buffer_unordered(partition_concurrency.max(1));

    let mut results = HashMap::with_capacity(tiles.len());
    while let Some(partition) = resolved.next().await {
        for result in partition? {
            results.insert(result.match_key.clone(), result);
        }
    }

    log::debug!("Batch matching produced {} distinct keys", results.len());
    Ok(results)
}

/// Group candidates by `group_id`, in order of first appearance.
fn partition_by_group_id<'a>(
    tiles: &[&'a TileCandidate],
) -> MatchOutcome<Vec<(&'a str, Vec<&'a TileCandidate>)>> {
    let mut partitions: Vec<(&str, Vec<&TileCandidate>)> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    for &tile in tiles {
        let group_id = tile
            .group_id()
            .ok_or_else(|| MatchError::MissingGroupId(MISSING_GROUP_ID.to_string()))?;

        match index_of.get(group_id) {
            Some(&idx) => partitions[idx].1.push(tile),
            None => {
                index_of.insert(group_id, partitions.len());
                partitions.push((group_id, vec![tile]));
            }
        }
    }

    Ok(partitions)
}

async fn resolve_partition<S: TileStore>(
    store: &S,
    group_id: &str,
    members: Vec<&TileCandidate>,
) -> MatchOutcome<Vec<MatchResult>> {
    match store.get_tiles(&TileFilter::by_group_id(group_id)).await {
        Ok(stored) => resolve_locally(&stored, &members),
        Err(error) => {
            log::warn!(
                "Grouped lookup for group_id '{}' failed, falling back to {} individual lookups: {}",
                group_id,
                members.len(),
                error
            );
            let mut results = Vec::with_capacity(members.len());
            for tile in members {
                results.push(find_existing_tile(store, tile).await?);
            }
            Ok(results)
        }
    }
}

fn resolve_locally(
    stored: &[StoredTile],
    members: &[&TileCandidate],
) -> MatchOutcome<Vec<MatchResult>> {
    let mut lookup: HashMap<LocalIdentity<'_>, &StoredTile> =
        HashMap::with_capacity(stored.len());
    for tile in stored {
        // Store returns tiles in id order; keep the first, like the single path.
        lookup.entry(LocalIdentity::of_stored(tile)).or_insert(tile);
    }

    members
        .iter()
        .map(|tile| {
            let match_key = key::key_or(tile, MISSING_GROUP_ID)?;
            let existing = LocalIdentity::of_candidate(tile)
                .and_then(|identity| lookup.get(&identity))
                .map(|found| (*found).clone());
            Ok(MatchResult::new(existing, match_key))
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/batch_tests.rs"]
mod tests;
