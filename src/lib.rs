//! Custom tile matching and deduplication for tile imports and sync.
//!
//! The engine lives in [`services::tiles`]; [`database`] holds the SQLite
//! tile store it reads from.

pub mod database;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::tiles::{
    batch_find_existing_tiles, create_key, find_existing_tile, generate_matching_stats,
    tiles_equal, validate_tile_for_matching, MatcherConfig, TileMatcher, TileStore,
};
pub use types::{MatchError, MatchKey, MatchResult, MatchingStats, StorageError, TileCandidate};
