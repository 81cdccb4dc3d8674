use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;

use crate::services::tiles::key;
use crate::types::{GameMode, StorageError, StoredTile, TileCandidate, TileFilter};

const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Connection settings for the SQLite tile store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            max_connections: 5,
        }
    }
}

/// Open the pool (creating the file if needed) and apply embedded migrations.
pub async fn connect(config: &StoreConfig) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    // Every connection to `:memory:` opens its own empty database.
    let max_connections = if config.database_url.contains(":memory:") {
        1
    } else {
        config.max_connections.max(1)
    };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Raw `tiles` row. Tags are a JSON array string, game mode is plain text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TileRow {
    pub id: i64,
    pub group: String,
    pub group_id: String,
    pub intensity: i64,
    pub action: String,
    pub game_mode: String,
    pub locale: String,
    pub tags: String,
    pub is_enabled: bool,
    pub is_custom: bool,
}

impl TryFrom<TileRow> for StoredTile {
    type Error = StorageError;

    fn try_from(row: TileRow) -> Result<Self, Self::Error> {
        let game_mode = GameMode::from_str(&row.game_mode).map_err(StorageError::Decode)?;
        let tags: Vec<String> = serde_json::from_str(&row.tags).map_err(|e| {
            StorageError::Decode(format!("Invalid tags for tile {}: {e}", row.id))
        })?;

        Ok(StoredTile {
            id: row.id,
            group: row.group,
            group_id: row.group_id,
            intensity: row.intensity,
            action: row.action,
            game_mode,
            locale: row.locale,
            tags,
            is_enabled: row.is_enabled,
            is_custom: row.is_custom,
        })
    }
}

pub async fn get_tile_rows(
    pool: &SqlitePool,
    filter: &TileFilter,
) -> Result<Vec<TileRow>, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        r#"
        SELECT id, "group", group_id, intensity, action, game_mode, locale, tags, is_enabled, is_custom
        FROM tiles
        WHERE 1 = 1"#,
    );

    if let Some(group_id) = &filter.group_id {
        qb.push(" AND group_id = ");
        qb.push_bind(group_id);
    }

    if let Some(intensity) = filter.intensity {
        qb.push(" AND intensity = ");
        qb.push_bind(intensity);
    }

    if let Some(action) = &filter.action {
        qb.push(" AND action = ");
        qb.push_bind(action);
    }

    if let Some(game_mode) = filter.game_mode {
        qb.push(" AND game_mode = ");
        qb.push_bind(game_mode.as_str());
    }

    if let Some(locale) = &filter.locale {
        qb.push(" AND locale = ");
        qb.push_bind(locale);
    }

    qb.push(" ORDER BY id ASC");

    qb.build_query_as::<TileRow>().fetch_all(pool).await
}

/// Fetch tiles matching `filter`, decoded into [`StoredTile`]s, ordered by id.
pub async fn get_tiles(
    pool: &SqlitePool,
    filter: &TileFilter,
) -> Result<Vec<StoredTile>, StorageError> {
    get_tile_rows(pool, filter)
        .await?
        .into_iter()
        .map(StoredTile::try_from)
        .collect()
}

/// Persist a candidate with identity defaults applied. Returns the new row id.
///
/// Callers persist after inspecting a `MatchResult`; the matcher itself never writes.
pub async fn insert_tile(pool: &SqlitePool, tile: &TileCandidate) -> Result<i64, sqlx::Error> {
    let group_id = tile
        .group_id()
        .ok_or_else(|| sqlx::Error::Protocol("Cannot insert tile without group_id".into()))?;
    let intensity = tile
        .intensity
        .ok_or_else(|| sqlx::Error::Protocol("Cannot insert tile without intensity".into()))?;
    let tags = serde_json::to_string(&tile.tags).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    let game_mode = key::game_mode_or_default(tile);
    let locale = key::locale_or_default(tile);

    let result = sqlx::query(
        r#"INSERT INTO tiles ("group", group_id, intensity, action, game_mode, locale, tags, is_enabled, is_custom)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&tile.group)
    .bind(group_id)
    .bind(intensity)
    .bind(&tile.action)
    .bind(game_mode.as_str())
    .bind(locale)
    .bind(tags)
    .bind(tile.is_enabled)
    .bind(tile.is_custom)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn count_tiles(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tiles")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

#[cfg(test)]
#[path = "tests/tile_repo_test.rs"]
mod tests;
