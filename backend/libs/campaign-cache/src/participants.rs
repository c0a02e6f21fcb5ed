//! Participant roster caching
//!
//! Holds the fully aggregated participant list of a campaign, never single
//! pages, so membership checks can skip pagination entirely on a hit.

use crate::models::{Participant, ParticipantList};
use crate::{normalize_id, CacheKey, CacheScope, CampaignCache};

impl CampaignCache {
    pub async fn cached_participants(&self, campaign_id: &str) -> Option<Vec<Participant>> {
        self.cached_for_campaign::<ParticipantList>(CacheScope::CampaignParticipants, campaign_id)
            .await
            .map(|list| list.participants)
    }

    pub async fn set_participants_cache(&self, campaign_id: &str, participants: &[Participant]) {
        let list = ParticipantList {
            participants: participants.to_vec(),
        };
        self.set_for_campaign(CacheScope::CampaignParticipants, campaign_id, &list)
            .await;
    }

    pub async fn invalidate_participants(&self, campaign_id: &str) {
        if let Some(campaign_id) = normalize_id(campaign_id) {
            self.invalidate(&CacheKey::participants(campaign_id)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Participant, ParticipantRole};
    use crate::test_support::{cache_over, CountingStore};
    use crate::{CacheEntry, CacheKey, CacheScope, CacheStore};
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn participant(id: &str, user_id: &str, role: ParticipantRole) -> Participant {
        Participant {
            id: id.to_string(),
            campaign_id: "camp-1".to_string(),
            user_id: user_id.to_string(),
            display_name: format!("Player {}", user_id),
            role: role as i32,
        }
    }

    #[tokio::test]
    async fn test_participants_round_trip() {
        let store = Arc::new(CountingStore::default());
        let cache = cache_over(store);
        let roster = vec![
            participant("p1", "u1", ParticipantRole::Gm),
            participant("p2", "u2", ParticipantRole::Player),
        ];

        cache.set_participants_cache("camp-1", &roster).await;

        assert_eq!(cache.cached_participants("camp-1").await, Some(roster));
    }

    #[tokio::test]
    async fn test_stale_participants_miss_even_before_expiry() {
        let store = Arc::new(CountingStore::default());
        let cache = cache_over(store.clone());
        cache
            .set_participants_cache("camp-1", &[participant("p1", "u1", ParticipantRole::Gm)])
            .await;

        store
            .inner
            .mark_campaign_scope_stale("camp-1", CacheScope::CampaignParticipants, 1, Utc::now())
            .await
            .unwrap();

        let entry = store
            .inner
            .get_cache_entry(&CacheKey::participants("camp-1"))
            .await
            .unwrap()
            .unwrap();
        assert!(entry.expires_at.unwrap() > Utc::now());

        assert!(cache.cached_participants("camp-1").await.is_none());
        assert!(store
            .inner
            .get_cache_entry(&CacheKey::participants("camp-1"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_corrupted_payload_is_deleted() {
        let store = Arc::new(CountingStore::default());
        let cache = cache_over(store.clone());
        let entry = CacheEntry::fresh(
            CacheKey::participants("camp-1"),
            CacheScope::CampaignParticipants,
            vec![0xff, 0xff, 0xff],
            Utc::now(),
            Duration::seconds(10),
        )
        .with_campaign("camp-1");
        store.inner.put_cache_entry(&entry).await.unwrap();

        assert!(cache.cached_participants("camp-1").await.is_none());
        assert!(store.inner.is_empty());
    }

    #[tokio::test]
    async fn test_empty_roster_is_never_served() {
        let store = Arc::new(CountingStore::default());
        let cache = cache_over(store.clone());

        cache.set_participants_cache("camp-1", &[]).await;

        assert!(cache.cached_participants("camp-1").await.is_none());
        assert!(store.inner.is_empty());
    }
}
