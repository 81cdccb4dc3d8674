use std::collections::HashMap;

use super::batch;
use super::config::MatcherConfig;
use super::preview::{self, ImportPreview};
use super::single;
use super::stats;
use super::store::{SqliteTileStore, TileStore};
use crate::types::{MatchKey, MatchOutcome, MatchResult, MatchingStats, TileCandidate};

/// Entry point for import and sync flows.
///
/// Holds no state between calls beyond its store and config, so one instance
/// can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct TileMatcher<S> {
    store: S,
    config: MatcherConfig,
}

impl<S: TileStore> TileMatcher<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, MatcherConfig::default())
    }

    pub fn with_config(store: S, config: MatcherConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub async fn find_existing_tile(&self, tile: &TileCandidate) -> MatchOutcome<MatchResult> {
        single::find_existing_tile(&self.store, tile).await
    }

    pub async fn batch_find_existing_tiles(
        &self,
        tiles: &[TileCandidate],
    ) -> MatchOutcome<HashMap<MatchKey, MatchResult>> {
        batch::batch_find_existing_tiles(&self.store, tiles, self.config.effective_concurrency())
            .await
    }

    pub async fn generate_matching_stats(&self, tiles: &[TileCandidate]) -> MatchingStats {
        stats::generate_matching_stats(tiles, &self.config.error_separator)
    }

    pub async fn preview_import(&self, tiles: &[TileCandidate]) -> MatchOutcome<ImportPreview> {
        preview::preview_import(&self.store, tiles, self.config.effective_concurrency()).await
    }
}

impl TileMatcher<SqliteTileStore> {
    /// Matcher over the SQLite store, configured from `app_settings`.
    pub async fn from_pool(pool: sqlx::SqlitePool) -> Self {
        let config = MatcherConfig::load(&pool).await;
        Self::with_config(SqliteTileStore::new(pool), config)
    }
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
