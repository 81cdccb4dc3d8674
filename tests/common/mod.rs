use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Once;
use tile_matcher::TileCandidate;

static INIT: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

#[allow(dead_code)]
pub async fn init_test_db() -> TestContext {
    init_logger();

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

pub fn tile(group_id: &str, intensity: i64, action: &str) -> TileCandidate {
    TileCandidate {
        group: format!("Group {group_id}"),
        group_id: Some(group_id.to_string()),
        intensity: Some(intensity),
        action: action.to_string(),
        tags: vec!["custom".to_string()],
        is_enabled: true,
        is_custom: true,
        ..Default::default()
    }
}
