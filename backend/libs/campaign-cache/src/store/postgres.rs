//! Postgres-backed store
//!
//! Two tables (see `migrations/`):
//! - `cache_entries`, unique on `cache_key`
//! - `campaign_event_cursors`, unique on `campaign_id`
//!
//! Upserts go through `ON CONFLICT`. Cursor writes carry their own
//! `WHERE last_seq < EXCLUDED.last_seq` guard so concurrent reconcilers can
//! never move a cursor backwards.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, info};

use super::CacheStore;
use crate::{CacheEntry, CacheError, CacheResult, CacheScope, CampaignEventCursor};

#[derive(Clone)]
pub struct PgCacheStore {
    pool: PgPool,
}

impl PgCacheStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a dedicated pool
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> CacheResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await?;

        debug!(max_connections, "Campaign cache pool connected");
        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> CacheResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Campaign cache migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn to_db_sequence(sequence: u64) -> CacheResult<i64> {
    i64::try_from(sequence)
        .map_err(|_| CacheError::InvalidData(format!("event sequence out of range: {}", sequence)))
}

fn from_db_sequence(sequence: i64) -> CacheResult<u64> {
    u64::try_from(sequence)
        .map_err(|_| CacheError::InvalidData(format!("negative event sequence: {}", sequence)))
}

fn entry_from_row(row: &PgRow) -> CacheResult<CacheEntry> {
    let scope: String = row.try_get("scope")?;
    Ok(CacheEntry {
        cache_key: row.try_get("cache_key")?,
        scope: scope.parse()?,
        campaign_id: row.try_get("campaign_id")?,
        user_id: row.try_get("user_id")?,
        payload: row.try_get("payload")?,
        stale: row.try_get("stale")?,
        stale_event_sequence: from_db_sequence(row.try_get("stale_event_seq")?)?,
        checked_at: row.try_get("checked_at")?,
        refreshed_at: row.try_get("refreshed_at")?,
        expires_at: row.try_get("expires_at")?,
    })
}

#[async_trait::async_trait]
impl CacheStore for PgCacheStore {
    async fn get_cache_entry(&self, cache_key: &str) -> CacheResult<Option<CacheEntry>> {
        let row = sqlx::query(
            r#"
            SELECT cache_key, scope, campaign_id, user_id, payload, stale,
                   stale_event_seq, checked_at, refreshed_at, expires_at
            FROM cache_entries
            WHERE cache_key = $1
            "#,
        )
        .bind(cache_key)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn put_cache_entry(&self, entry: &CacheEntry) -> CacheResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cache_entries (
                cache_key, scope, campaign_id, user_id, payload, stale,
                stale_event_seq, checked_at, refreshed_at, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (cache_key) DO UPDATE SET
                scope = EXCLUDED.scope,
                campaign_id = EXCLUDED.campaign_id,
                user_id = EXCLUDED.user_id,
                payload = EXCLUDED.payload,
                stale = EXCLUDED.stale,
                stale_event_seq = GREATEST(cache_entries.stale_event_seq, EXCLUDED.stale_event_seq),
                checked_at = EXCLUDED.checked_at,
                refreshed_at = EXCLUDED.refreshed_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(&entry.cache_key)
        .bind(entry.scope.as_str())
        .bind(&entry.campaign_id)
        .bind(&entry.user_id)
        .bind(&entry.payload)
        .bind(entry.stale)
        .bind(to_db_sequence(entry.stale_event_sequence)?)
        .bind(entry.checked_at)
        .bind(entry.refreshed_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_cache_entry(&self, cache_key: &str) -> CacheResult<()> {
        sqlx::query("DELETE FROM cache_entries WHERE cache_key = $1")
            .bind(cache_key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_tracked_campaign_ids(&self) -> CacheResult<Vec<String>> {
        let rows = sqlx::query("SELECT campaign_id FROM campaign_event_cursors ORDER BY campaign_id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get("campaign_id").map_err(CacheError::from))
            .collect()
    }

    async fn get_campaign_event_cursor(
        &self,
        campaign_id: &str,
    ) -> CacheResult<Option<CampaignEventCursor>> {
        let row = sqlx::query(
            r#"
            SELECT campaign_id, last_seq, updated_at
            FROM campaign_event_cursors
            WHERE campaign_id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(CampaignEventCursor {
                campaign_id: row.try_get("campaign_id")?,
                last_sequence: from_db_sequence(row.try_get("last_seq")?)?,
                updated_at: row.try_get("updated_at")?,
            })),
            None => Ok(None),
        }
    }

    async fn put_campaign_event_cursor(&self, cursor: &CampaignEventCursor) -> CacheResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO campaign_event_cursors (campaign_id, last_seq, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (campaign_id) DO UPDATE SET
                last_seq = EXCLUDED.last_seq,
                updated_at = EXCLUDED.updated_at
            WHERE campaign_event_cursors.last_seq < EXCLUDED.last_seq
            "#,
        )
        .bind(&cursor.campaign_id)
        .bind(to_db_sequence(cursor.last_sequence)?)
        .bind(cursor.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_campaign_scope_stale(
        &self,
        campaign_id: &str,
        scope: CacheScope,
        event_sequence: u64,
        observed_at: DateTime<Utc>,
    ) -> CacheResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE cache_entries
            SET stale = TRUE,
                stale_event_seq = $3,
                checked_at = $4
            WHERE campaign_id = $1
              AND scope = $2
              AND stale_event_seq < $3
            "#,
        )
        .bind(campaign_id)
        .bind(scope.as_str())
        .bind(to_db_sequence(event_sequence)?)
        .bind(observed_at)
        .execute(&self.pool)
        .await?;

        let marked = result.rows_affected();
        debug!(
            campaign_id = %campaign_id,
            scope = %scope,
            event_sequence,
            marked,
            "Marked campaign scope stale"
        );
        Ok(marked)
    }
}
