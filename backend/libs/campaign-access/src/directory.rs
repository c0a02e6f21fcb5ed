//! Campaign directory
//!
//! Aggregated participant, contact and invite listings. Participant and
//! invite listings read through the campaign cache; only complete
//! aggregations are ever written back.

use campaign_cache::models::{Contact, Invite, Participant};
use campaign_cache::CampaignCache;
use std::sync::Arc;
use tracing::debug;

use crate::pagination::collect_all_pages;
use crate::{
    invite_candidates, required, AccessConfig, AccessError, AccessResult, ContactLister, InviteLister,
    ParticipantLister,
};

#[derive(Clone)]
pub struct CampaignDirectory {
    participants: Arc<dyn ParticipantLister>,
    contacts: Arc<dyn ContactLister>,
    invites: Arc<dyn InviteLister>,
    cache: CampaignCache,
    config: AccessConfig,
}

impl CampaignDirectory {
    pub fn new(
        participants: Arc<dyn ParticipantLister>,
        contacts: Arc<dyn ContactLister>,
        invites: Arc<dyn InviteLister>,
        cache: CampaignCache,
        config: AccessConfig,
    ) -> Self {
        Self {
            participants,
            contacts,
            invites,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &CampaignCache {
        &self.cache
    }

    /// Every participant of a campaign
    pub async fn all_participants(&self, campaign_id: &str) -> AccessResult<Vec<Participant>> {
        let campaign_id = required(campaign_id, "campaign id")?;
        if let Some(cached) = self.cache.cached_participants(campaign_id).await {
            return Ok(cached);
        }

        let lister = &self.participants;
        let page_size = self.config.participant_page_size;
        let participants = collect_all_pages("list participants", move |token: String| async move {
            lister.list_participants(campaign_id, page_size, &token).await
        })
        .await?;

        debug!(campaign_id = %campaign_id, count = participants.len(), "Participants aggregated");
        self.cache
            .set_participants_cache(campaign_id, &participants)
            .await;
        Ok(participants)
    }

    /// Every contact of a user; not cached
    pub async fn all_contacts(&self, owner_user_id: &str) -> AccessResult<Vec<Contact>> {
        let owner_user_id = required(owner_user_id, "owner user id")?;
        let lister = &self.contacts;
        let page_size = self.config.contact_page_size;
        collect_all_pages("list contacts", move |token: String| async move {
            lister.list_contacts(owner_user_id, page_size, &token).await
        })
        .await
    }

    pub async fn campaign_invites(&self, campaign_id: &str) -> AccessResult<Vec<Invite>> {
        let campaign_id = required(campaign_id, "campaign id")?;
        if let Some(cached) = self.cache.cached_invites(campaign_id).await {
            return Ok(cached);
        }

        let invites = self
            .invites
            .list_invites(campaign_id, self.config.invite_page_size)
            .await
            .map_err(|status| AccessError::remote("list invites", status))?;
        self.cache.set_invites_cache(campaign_id, &invites).await;
        Ok(invites)
    }

    /// The participant record bound to `user_id`, first match wins
    pub async fn participant_for_user(
        &self,
        campaign_id: &str,
        user_id: &str,
    ) -> AccessResult<Option<Participant>> {
        let user_id = required(user_id, "user id")?;
        let participants = self.all_participants(campaign_id).await?;
        Ok(participants
            .into_iter()
            .find(|participant| participant.user_id.trim() == user_id))
    }

    /// Contacts of the owner who are neither participants nor already hold a
    /// pending invite
    pub async fn invite_candidates_for(
        &self,
        owner_user_id: &str,
        campaign_id: &str,
    ) -> AccessResult<Vec<String>> {
        let (contacts, participants, invites) = tokio::try_join!(
            self.all_contacts(owner_user_id),
            self.all_participants(campaign_id),
            self.campaign_invites(campaign_id),
        )?;
        Ok(invite_candidates(&contacts, &participants, &invites))
    }
}
