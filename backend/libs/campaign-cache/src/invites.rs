//! Invite list caching

use crate::models::{Invite, InviteList};
use crate::{normalize_id, CacheKey, CacheScope, CampaignCache};

impl CampaignCache {
    pub async fn cached_invites(&self, campaign_id: &str) -> Option<Vec<Invite>> {
        self.cached_for_campaign::<InviteList>(CacheScope::CampaignInvites, campaign_id)
            .await
            .map(|list| list.invites)
    }

    pub async fn set_invites_cache(&self, campaign_id: &str, invites: &[Invite]) {
        let list = InviteList {
            invites: invites.to_vec(),
        };
        self.set_for_campaign(CacheScope::CampaignInvites, campaign_id, &list)
            .await;
    }

    /// Called after an invite is created, claimed or revoked
    pub async fn invalidate_invites(&self, campaign_id: &str) {
        if let Some(campaign_id) = normalize_id(campaign_id) {
            self.invalidate(&CacheKey::invites(campaign_id)).await;
        }
    }
}
