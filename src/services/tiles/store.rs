use sqlx::SqlitePool;

use crate::database::tile_repo::{self, StoreConfig};
use crate::types::{StorageError, StoredTile, TileFilter};

/// Read access to persisted tiles. The matcher never writes through this.
#[allow(async_fn_in_trait)]
pub trait TileStore {
    /// All tiles matching every set field of `filter`.
    async fn get_tiles(&self, filter: &TileFilter) -> Result<Vec<StoredTile>, StorageError>;
}

/// [`TileStore`] backed by the `tiles` table.
#[derive(Debug, Clone)]
pub struct SqliteTileStore {
    pool: SqlitePool,
}

impl SqliteTileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &StoreConfig) -> Result<Self, StorageError> {
        let pool = tile_repo::connect(config).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl TileStore for SqliteTileStore {
    async fn get_tiles(&self, filter: &TileFilter) -> Result<Vec<StoredTile>, StorageError> {
        tile_repo::get_tiles(&self.pool, filter).await
    }
}
