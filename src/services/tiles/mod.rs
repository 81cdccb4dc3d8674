//! Custom tile matching and deduplication.
//!
//! Resolves whether an imported tile already exists in the store so imports
//! become idempotent upserts. Identity is the composite [`MatchKey`] of
//! `group_id`, intensity, action, game mode and locale; the `group` label is
//! cosmetic. Nothing here writes to the store.
//!
//! [`MatchKey`]: crate::types::MatchKey

pub mod batch;
pub mod config;
pub mod key;
pub mod matcher;
pub mod preview;
pub mod single;
pub mod stats;
pub mod store;
pub mod validator;

pub use batch::batch_find_existing_tiles;
pub use config::MatcherConfig;
pub use key::{create_key, tiles_equal, DEFAULT_GAME_MODE, DEFAULT_LOCALE};
pub use matcher::TileMatcher;
pub use preview::{preview_import, ImportAction, ImportPreview, ImportPreviewItem};
pub use single::find_existing_tile;
pub use stats::generate_matching_stats;
pub use store::{SqliteTileStore, TileStore};
pub use validator::validate_tile_for_matching;

#[cfg(test)]
#[path = "tests/mock_store.rs"]
pub(crate) mod mock_store;
