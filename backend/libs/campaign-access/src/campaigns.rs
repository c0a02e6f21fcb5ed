//! Campaign reads and writes through the cache
//!
//! Reads are read-through: a usable snapshot answers without a remote call,
//! otherwise the game service is asked and the answer written back. Writes go
//! to the game service first and then delete the views they invalidate.

use campaign_cache::models::{Campaign, Character, Session};
use campaign_cache::CampaignCache;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{required, AccessError, AccessResult, CampaignService, NewCampaign};

#[derive(Clone)]
pub struct CampaignWorkflow {
    service: Arc<dyn CampaignService>,
    cache: CampaignCache,
}

impl CampaignWorkflow {
    pub fn new(service: Arc<dyn CampaignService>, cache: CampaignCache) -> Self {
        Self { service, cache }
    }

    pub async fn campaigns_for_user(&self, user_id: &str) -> AccessResult<Vec<Campaign>> {
        let user_id = required(user_id, "user id")?;
        if let Some(cached) = self.cache.cached_campaign_list(user_id).await {
            return Ok(cached);
        }

        let campaigns = self
            .service
            .list_campaigns(user_id)
            .await
            .map_err(|status| AccessError::remote("list campaigns", status))?;
        self.cache.set_campaign_list_cache(user_id, &campaigns).await;
        Ok(campaigns)
    }

    pub async fn campaign(&self, campaign_id: &str) -> AccessResult<Campaign> {
        let campaign_id = required(campaign_id, "campaign id")?;
        if let Some(cached) = self.cache.cached_campaign(campaign_id).await {
            return Ok(cached);
        }

        let campaign = self
            .service
            .get_campaign(campaign_id)
            .await
            .map_err(|status| AccessError::remote("get campaign", status))?;
        self.cache.set_campaign_cache(campaign_id, &campaign).await;
        Ok(campaign)
    }

    pub async fn campaign_sessions(&self, campaign_id: &str) -> AccessResult<Vec<Session>> {
        let campaign_id = required(campaign_id, "campaign id")?;
        if let Some(cached) = self.cache.cached_sessions(campaign_id).await {
            return Ok(cached);
        }

        let sessions = self
            .service
            .list_sessions(campaign_id)
            .await
            .map_err(|status| AccessError::remote("list sessions", status))?;
        self.cache.set_sessions_cache(campaign_id, &sessions).await;
        Ok(sessions)
    }

    pub async fn campaign_characters(&self, campaign_id: &str) -> AccessResult<Vec<Character>> {
        let campaign_id = required(campaign_id, "campaign id")?;
        if let Some(cached) = self.cache.cached_characters(campaign_id).await {
            return Ok(cached);
        }

        let characters = self
            .service
            .list_characters(campaign_id)
            .await
            .map_err(|status| AccessError::remote("list characters", status))?;
        self.cache
            .set_characters_cache(campaign_id, &characters)
            .await;
        Ok(characters)
    }

    /// Create a campaign owned by `owner_user_id`.
    ///
    /// The owner's campaign list is deleted, not marked stale, so the next
    /// read refetches it.
    pub async fn create_campaign(
        &self,
        owner_user_id: &str,
        input: &NewCampaign,
    ) -> AccessResult<Campaign> {
        let owner_user_id = required(owner_user_id, "owner user id")?;
        if input.name.trim().is_empty() {
            return Err(AccessError::InvalidArgument(
                "campaign name is required".to_string(),
            ));
        }

        let campaign = self
            .service
            .create_campaign(owner_user_id, input)
            .await
            .map_err(|status| AccessError::remote("create campaign", status))?;
        info!(campaign_id = %campaign.id, owner_user_id = %owner_user_id, "Campaign created");

        self.cache.invalidate_campaign_list(owner_user_id).await;
        debug!(owner_user_id = %owner_user_id, "Owner campaign list invalidated");
        Ok(campaign)
    }
}
