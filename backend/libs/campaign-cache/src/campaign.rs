//! Campaign summary caching
//!
//! Two views share the `campaign_summary` scope: the per-user campaign list
//! and the per-campaign detail record.

use crate::models::{Campaign, CampaignList};
use crate::{normalize_id, CacheKey, CacheScope, CampaignCache};

impl CampaignCache {
    // ============= Campaign List =============

    /// Cached campaigns visible to a user
    pub async fn cached_campaign_list(&self, user_id: &str) -> Option<Vec<Campaign>> {
        let user_id = normalize_id(user_id)?;
        self.read_snapshot::<CampaignList>(
            CacheScope::CampaignSummary,
            &CacheKey::campaign_list(user_id),
        )
        .await
        .map(|list| list.campaigns)
    }

    pub async fn set_campaign_list_cache(&self, user_id: &str, campaigns: &[Campaign]) {
        let Some(user_id) = normalize_id(user_id) else {
            return;
        };
        let list = CampaignList {
            campaigns: campaigns.to_vec(),
        };
        self.write_snapshot(
            CacheScope::CampaignSummary,
            CacheKey::campaign_list(user_id),
            self.ttls.campaign_list,
            "",
            user_id,
            &list,
        )
        .await;
    }

    /// Drop the user's campaign list, e.g. after they create or join a
    /// campaign
    pub async fn invalidate_campaign_list(&self, user_id: &str) {
        if let Some(user_id) = normalize_id(user_id) {
            self.invalidate(&CacheKey::campaign_list(user_id)).await;
        }
    }

    // ============= Campaign Detail =============

    pub async fn cached_campaign(&self, campaign_id: &str) -> Option<Campaign> {
        self.cached_for_campaign(CacheScope::CampaignSummary, campaign_id)
            .await
    }

    pub async fn set_campaign_cache(&self, campaign_id: &str, campaign: &Campaign) {
        self.set_for_campaign(CacheScope::CampaignSummary, campaign_id, campaign)
            .await;
    }

    pub async fn invalidate_campaign(&self, campaign_id: &str) {
        if let Some(campaign_id) = normalize_id(campaign_id) {
            self.invalidate(&CacheKey::campaign(campaign_id)).await;
        }
    }
}
