//! Cache store backends

mod memory;
mod postgres;

pub use memory::InMemoryCacheStore;
pub use postgres::PgCacheStore;

use chrono::{DateTime, Utc};

use crate::{CacheEntry, CacheResult, CacheScope, CampaignEventCursor};

/// Persistence for cache entries and campaign event cursors.
///
/// Errors mean the backend failed; a miss is `Ok(None)`. Implementations are
/// internally synchronized and shared as `Arc<dyn CacheStore>`.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_cache_entry(&self, cache_key: &str) -> CacheResult<Option<CacheEntry>>;

    /// Upsert keyed by `cache_key`; last writer wins. `stale_event_sequence`
    /// is merged with the stored value so a refresh keeps the highest
    /// sequence already applied.
    async fn put_cache_entry(&self, entry: &CacheEntry) -> CacheResult<()>;

    /// Deleting a missing key succeeds.
    async fn delete_cache_entry(&self, cache_key: &str) -> CacheResult<()>;

    /// Campaign ids that have a cursor row, sorted.
    async fn list_tracked_campaign_ids(&self) -> CacheResult<Vec<String>>;

    async fn get_campaign_event_cursor(
        &self,
        campaign_id: &str,
    ) -> CacheResult<Option<CampaignEventCursor>>;

    /// Compare-and-advance. Returns `true` when the cursor was created or
    /// moved forward; an equal or older position leaves the row untouched.
    async fn put_campaign_event_cursor(&self, cursor: &CampaignEventCursor) -> CacheResult<bool>;

    /// Flag every entry of `scope` for the campaign as stale unless it has
    /// already absorbed `event_sequence`. Returns the number of entries
    /// flagged; replays are no-ops.
    async fn mark_campaign_scope_stale(
        &self,
        campaign_id: &str,
        scope: CacheScope,
        event_sequence: u64,
        observed_at: DateTime<Utc>,
    ) -> CacheResult<u64>;
}
