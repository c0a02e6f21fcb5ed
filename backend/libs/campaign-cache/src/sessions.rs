//! Session list caching

use crate::models::{Session, SessionList};
use crate::{normalize_id, CacheKey, CacheScope, CampaignCache};

impl CampaignCache {
    pub async fn cached_sessions(&self, campaign_id: &str) -> Option<Vec<Session>> {
        self.cached_for_campaign::<SessionList>(CacheScope::CampaignSessions, campaign_id)
            .await
            .map(|list| list.sessions)
    }

    pub async fn set_sessions_cache(&self, campaign_id: &str, sessions: &[Session]) {
        let list = SessionList {
            sessions: sessions.to_vec(),
        };
        self.set_for_campaign(CacheScope::CampaignSessions, campaign_id, &list)
            .await;
    }

    pub async fn invalidate_sessions(&self, campaign_id: &str) {
        if let Some(campaign_id) = normalize_id(campaign_id) {
            self.invalidate(&CacheKey::sessions(campaign_id)).await;
        }
    }
}
