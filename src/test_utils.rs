use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Once;

use crate::types::{GameMode, TileCandidate};

static INIT: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

pub async fn init_test_db() -> TestContext {
    init_logger();

    // Single connection: every connection to sqlite::memory: is a separate database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    TestContext { pool }
}

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Candidate with every identity field set; game mode and locale left to defaults.
pub fn candidate(group_id: &str, intensity: i64, action: &str) -> TileCandidate {
    TileCandidate {
        group: format!("Group {group_id}"),
        group_id: Some(group_id.to_string()),
        intensity: Some(intensity),
        action: action.to_string(),
        game_mode: None,
        locale: None,
        tags: Vec::new(),
        is_enabled: true,
        is_custom: true,
    }
}

pub fn with_mode(mut tile: TileCandidate, mode: GameMode, locale: &str) -> TileCandidate {
    tile.game_mode = Some(mode);
    tile.locale = Some(locale.to_string());
    tile
}
