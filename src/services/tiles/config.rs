use crate::database::settings_repo;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

const SETTINGS_PREFIX: &str = "tile_matcher.";
pub const PARTITION_CONCURRENCY_KEY: &str = "tile_matcher.partition_concurrency";
pub const ERROR_SEPARATOR_KEY: &str = "tile_matcher.error_separator";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    /// How many `group_id` partitions a batch queries at once. 0 behaves as 1.
    pub partition_concurrency: usize,
    /// Joins validation messages in `MatchingStats::matching_errors`.
    pub error_separator: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            partition_concurrency: 4,
            error_separator: ", ".into(),
        }
    }
}

impl MatcherConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.partition_concurrency.max(1)
    }

    /// Defaults overlaid with any `tile_matcher.*` rows from `app_settings`.
    pub async fn load(pool: &SqlitePool) -> Self {
        let mut config = Self::default();

        let kv = match settings_repo::get_settings_with_prefix(pool, SETTINGS_PREFIX).await {
            Ok(m) => m,
            Err(e) => {
                log::error!("Failed to load matcher settings from DB: {e}");
                return config;
            }
        };

        if let Some(raw) = kv.get(PARTITION_CONCURRENCY_KEY) {
            match raw.trim().parse::<usize>() {
                Ok(value) => config.partition_concurrency = value,
                Err(e) => log::warn!(
                    "Ignoring invalid {PARTITION_CONCURRENCY_KEY} '{raw}': {e}"
                ),
            }
        }

        if let Some(separator) = kv.get(ERROR_SEPARATOR_KEY) {
            config.error_separator = separator.clone();
        }

        config
    }

    pub async fn save(&self, pool: &SqlitePool) -> Result<(), sqlx::Error> {
        settings_repo::set_setting(
            pool,
            PARTITION_CONCURRENCY_KEY,
            &self.partition_concurrency.to_string(),
        )
        .await?;
        settings_repo::set_setting(pool, ERROR_SEPARATOR_KEY, &self.error_separator).await
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
