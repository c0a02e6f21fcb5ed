//! Campaign read cache
//!
//! Snapshot cache sitting between web handlers and the game-state services:
//! - Deterministic key schema per scope
//! - TTL expiry plus an out-of-band stale flag driven by campaign event cursors
//! - Lazy eviction: unusable or undecodable entries are deleted on read
//! - Fail-open reads and fire-and-forget writes (the cache is an optimization)
//! - Pluggable store (`InMemoryCacheStore`, `PgCacheStore`)
//! - Metrics integration

mod config;
mod entry;
mod error;
mod keys;
mod metrics;

pub mod campaign;
pub mod characters;
pub mod invites;
pub mod models;
pub mod participants;
pub mod reconcile;
pub mod sessions;
pub mod store;

pub use config::{CacheConfig, CacheTtls};
pub use entry::{CacheEntry, CacheScope, CampaignEventCursor};
pub use error::{CacheError, CacheResult};
pub use keys::CacheKey;
pub use metrics::{CacheMetrics, MissReason};
pub use reconcile::{CampaignEvent, CampaignEventKind, CampaignEventReconciler};
pub use store::{CacheStore, InMemoryCacheStore, PgCacheStore};

use chrono::Utc;
use prost::Message;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Read-through accessors over a shared [`CacheStore`].
///
/// Per-entity accessors live in the entity modules (`campaign`,
/// `participants`, ...). All of them degrade to a miss on any store or decode
/// failure and never surface cache errors to callers.
#[derive(Clone)]
pub struct CampaignCache {
    store: Arc<dyn CacheStore>,
    ttls: CacheTtls,
    metrics: CacheMetrics,
}

impl CampaignCache {
    pub fn new(store: Arc<dyn CacheStore>, ttls: CacheTtls) -> Self {
        Self {
            store,
            ttls,
            metrics: CacheMetrics::new(),
        }
    }

    pub fn with_metrics(store: Arc<dyn CacheStore>, ttls: CacheTtls, metrics: CacheMetrics) -> Self {
        Self {
            store,
            ttls,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn ttls(&self) -> &CacheTtls {
        &self.ttls
    }

    /// Delete a cached view outright (write-path invalidation)
    pub async fn invalidate(&self, cache_key: &str) {
        let scope = CacheKey::scope_of(cache_key);
        match self.store.delete_cache_entry(cache_key).await {
            Ok(()) => {
                debug!(key = %cache_key, "Cache invalidated");
                if let Some(scope) = scope {
                    self.metrics.record_invalidation(scope);
                }
            }
            Err(e) => {
                warn!(key = %cache_key, error = %e, "Cache invalidation failed");
                if let Some(scope) = scope {
                    self.metrics.record_error(scope, "store_delete");
                }
            }
        }
    }

    async fn cached_for_campaign<T: Message + Default>(
        &self,
        scope: CacheScope,
        campaign_id: &str,
    ) -> Option<T> {
        let campaign_id = normalize_id(campaign_id)?;
        self.read_snapshot(scope, &CacheKey::for_campaign(scope, campaign_id))
            .await
    }

    async fn set_for_campaign<T: Message>(&self, scope: CacheScope, campaign_id: &str, value: &T) {
        let Some(campaign_id) = normalize_id(campaign_id) else {
            return;
        };
        let entry_ttl = self.ttls.for_collection(scope);
        self.write_snapshot(
            scope,
            CacheKey::for_campaign(scope, campaign_id),
            entry_ttl,
            campaign_id,
            "",
            value,
        )
        .await;
    }

    async fn read_snapshot<T: Message + Default>(&self, scope: CacheScope, cache_key: &str) -> Option<T> {
        let entry = match self.store.get_cache_entry(cache_key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(key = %cache_key, "Cache miss");
                self.metrics.record_miss(scope, MissReason::Absent);
                return None;
            }
            Err(e) => {
                warn!(key = %cache_key, error = %e, "Cache store read failed");
                self.metrics.record_error(scope, "store_read");
                self.metrics.record_miss(scope, MissReason::StoreError);
                return None;
            }
        };

        let now = Utc::now();
        if !entry.is_usable(now) {
            let reason = if entry.stale {
                MissReason::Stale
            } else if entry.is_expired(now) {
                MissReason::Expired
            } else {
                MissReason::Empty
            };
            debug!(key = %cache_key, reason = ?reason, "Evicting unusable cache entry");
            self.metrics.record_miss(scope, reason);
            self.evict(scope, cache_key).await;
            return None;
        }

        match T::decode(entry.payload.as_slice()) {
            Ok(value) => {
                debug!(key = %cache_key, "Cache hit");
                self.metrics.record_hit(scope);
                Some(value)
            }
            Err(e) => {
                warn!(key = %cache_key, error = %e, "Cache payload decode failed");
                self.metrics.record_error(scope, "decode");
                self.metrics.record_miss(scope, MissReason::Undecodable);
                self.evict(scope, cache_key).await;
                None
            }
        }
    }

    async fn write_snapshot<T: Message>(
        &self,
        scope: CacheScope,
        cache_key: String,
        entry_ttl: Duration,
        campaign_id: &str,
        user_id: &str,
        value: &T,
    ) {
        let now = Utc::now();
        let Some(entry_ttl) = chrono::Duration::from_std(entry_ttl)
            .ok()
            .filter(|ttl| now.checked_add_signed(*ttl).is_some())
        else {
            warn!(key = %cache_key, ttl = ?entry_ttl, "Cache TTL out of range, skipping write");
            self.metrics.record_error(scope, "ttl_range");
            return;
        };

        let payload = value.encode_to_vec();
        if payload.is_empty() {
            // Nothing worth serving; drop whatever an older snapshot held
            debug!(key = %cache_key, "Empty snapshot, not cached");
            self.evict(scope, &cache_key).await;
            return;
        }

        let entry = CacheEntry::fresh(cache_key, scope, payload, now, entry_ttl)
            .with_campaign(campaign_id)
            .with_user(user_id);

        match self.store.put_cache_entry(&entry).await {
            Ok(()) => {
                debug!(key = %entry.cache_key, ttl_secs = entry_ttl.num_seconds(), "Cache set");
                self.metrics.record_write(scope);
            }
            Err(e) => {
                warn!(key = %entry.cache_key, error = %e, "Cache store write failed");
                self.metrics.record_error(scope, "store_write");
            }
        }
    }

    async fn evict(&self, scope: CacheScope, cache_key: &str) {
        if let Err(e) = self.store.delete_cache_entry(cache_key).await {
            warn!(key = %cache_key, error = %e, "Cache eviction failed");
            self.metrics.record_error(scope, "store_delete");
        }
    }
}

/// Trimmed identifier, or `None` when blank
pub(crate) fn normalize_id(id: &str) -> Option<&str> {
    let id = id.trim();
    (!id.is_empty()).then_some(id)
}
