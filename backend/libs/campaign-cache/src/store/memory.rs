//! Process-local store
//!
//! Uses `DashMap` so concurrent request tasks never contend on a single lock,
//! and no shard guard is held across an `.await`.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use super::CacheStore;
use crate::{CacheEntry, CacheResult, CacheScope, CampaignEventCursor};

#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
    cursors: DashMap<String, CampaignEventCursor>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including stale and expired ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get_cache_entry(&self, cache_key: &str) -> CacheResult<Option<CacheEntry>> {
        Ok(self.entries.get(cache_key).map(|entry| entry.value().clone()))
    }

    async fn put_cache_entry(&self, entry: &CacheEntry) -> CacheResult<()> {
        match self.entries.entry(entry.cache_key.clone()) {
            Entry::Occupied(mut occupied) => {
                let applied = occupied
                    .get()
                    .stale_event_sequence
                    .max(entry.stale_event_sequence);
                let stored = occupied.get_mut();
                *stored = entry.clone();
                stored.stale_event_sequence = applied;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry.clone());
            }
        }
        Ok(())
    }

    async fn delete_cache_entry(&self, cache_key: &str) -> CacheResult<()> {
        self.entries.remove(cache_key);
        Ok(())
    }

    async fn list_tracked_campaign_ids(&self) -> CacheResult<Vec<String>> {
        let mut ids: Vec<String> = self.cursors.iter().map(|c| c.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }

    async fn get_campaign_event_cursor(
        &self,
        campaign_id: &str,
    ) -> CacheResult<Option<CampaignEventCursor>> {
        Ok(self.cursors.get(campaign_id).map(|c| c.value().clone()))
    }

    async fn put_campaign_event_cursor(&self, cursor: &CampaignEventCursor) -> CacheResult<bool> {
        let advanced = match self.cursors.entry(cursor.campaign_id.clone()) {
            Entry::Occupied(mut occupied) => {
                if cursor.last_sequence > occupied.get().last_sequence {
                    occupied.insert(cursor.clone());
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(cursor.clone());
                true
            }
        };
        Ok(advanced)
    }

    async fn mark_campaign_scope_stale(
        &self,
        campaign_id: &str,
        scope: CacheScope,
        event_sequence: u64,
        observed_at: DateTime<Utc>,
    ) -> CacheResult<u64> {
        let mut marked = 0u64;
        for mut entry in self.entries.iter_mut() {
            let entry = entry.value_mut();
            if entry.campaign_id != campaign_id
                || entry.scope != scope
                || entry.stale_event_sequence >= event_sequence
            {
                continue;
            }
            entry.stale = true;
            entry.stale_event_sequence = event_sequence;
            entry.checked_at = observed_at;
            marked += 1;
        }

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
