use sqlx::SqlitePool;
use std::collections::HashMap;

// ── KV Settings ─────────────────────────────────────────────

/// Get a single setting value by key.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM app_settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| r.0))
}

/// Upsert a single setting (INSERT OR REPLACE).
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR REPLACE INTO app_settings (key, value) VALUES (?, ?)")
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    Ok(())
}

/// Fetch every setting whose key starts with `prefix`.
pub async fn get_settings_with_prefix(
    pool: &SqlitePool,
    prefix: &str,
) -> Result<HashMap<String, String>, sqlx::Error> {
    let pattern = format!("{prefix}%");
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT key, value FROM app_settings WHERE key LIKE ?")
            .bind(pattern)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().collect())
}

#[cfg(test)]
#[path = "tests/settings_repo_tests.rs"]
mod tests;
