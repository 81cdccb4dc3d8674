use super::*;
use crate::database::{settings_repo, tile_repo};
use crate::services::tiles::config::PARTITION_CONCURRENCY_KEY;
use crate::services::tiles::mock_store::RecordingStore;
use crate::test_utils::{candidate, init_test_db};

#[tokio::test]
async fn test_facade_delegates_to_store() {
    let matcher = TileMatcher::new(RecordingStore::new().with_tile(candidate("warmup", 1, "Dance")));

    let single = matcher
        .find_existing_tile(&candidate("warmup", 1, "Dance"))
        .await
        .unwrap();
    assert!(single.is_exact_match);

    let batch = matcher
        .batch_find_existing_tiles(&[candidate("warmup", 1, "Dance"), candidate("other", 1, "x")])
        .await
        .unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(matcher.store().call_count(), 3);
}

#[tokio::test]
async fn test_stats_use_configured_separator() {
    let config = MatcherConfig {
        error_separator: " / ".into(),
        ..Default::default()
    };
    let matcher = TileMatcher::with_config(RecordingStore::new(), config);

    let mut tile = candidate("warmup", 1, "");
    tile.group = String::new();
    let stats = matcher.generate_matching_stats(&[tile]).await;

    assert_eq!(
        stats.matching_errors[0].error,
        "Missing group name / Missing action"
    );
    assert_eq!(matcher.store().call_count(), 0);
}

#[tokio::test]
async fn test_from_pool_reads_config_and_matches_sqlite() {
    let pool = init_test_db().await.pool;
    settings_repo::set_setting(&pool, PARTITION_CONCURRENCY_KEY, "2")
        .await
        .unwrap();
    let stored_id = tile_repo::insert_tile(&pool, &candidate("warmup", 1, "Dance"))
        .await
        .unwrap();

    let matcher = TileMatcher::from_pool(pool).await;
    assert_eq!(matcher.config().partition_concurrency, 2);

    let preview = matcher
        .preview_import(&[candidate("warmup", 1, "Dance"), candidate("warmup", 5, "Dance")])
        .await
        .unwrap();

    assert_eq!(preview.items[0].existing_id, Some(stored_id));
    assert_eq!(preview.updates, 1);
    assert_eq!(preview.inserts, 1);
}
