//! Cache key schema
//!
//! Every accessor builds its key here so that reads, writes and explicit
//! invalidations always agree.
//! Key format: {scope}:{id|user}:{identifier}

use crate::CacheScope;

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    // ============= Campaign Summary Keys =============

    /// Campaigns visible to a user
    /// Format: campaign_summary:user:{user_id}
    pub fn campaign_list(user_id: &str) -> String {
        format!("{}:user:{}", CacheScope::CampaignSummary, user_id)
    }

    /// Single campaign metadata
    /// Format: campaign_summary:id:{campaign_id}
    pub fn campaign(campaign_id: &str) -> String {
        Self::for_campaign(CacheScope::CampaignSummary, campaign_id)
    }

    // ============= Campaign Collection Keys =============

    /// Format: campaign_participants:id:{campaign_id}
    pub fn participants(campaign_id: &str) -> String {
        Self::for_campaign(CacheScope::CampaignParticipants, campaign_id)
    }

    /// Format: campaign_sessions:id:{campaign_id}
    pub fn sessions(campaign_id: &str) -> String {
        Self::for_campaign(CacheScope::CampaignSessions, campaign_id)
    }

    /// Format: campaign_characters:id:{campaign_id}
    pub fn characters(campaign_id: &str) -> String {
        Self::for_campaign(CacheScope::CampaignCharacters, campaign_id)
    }

    /// Format: campaign_invites:id:{campaign_id}
    pub fn invites(campaign_id: &str) -> String {
        Self::for_campaign(CacheScope::CampaignInvites, campaign_id)
    }

    /// Campaign-bound key for any scope
    /// Format: {scope}:id:{campaign_id}
    pub fn for_campaign(scope: CacheScope, campaign_id: &str) -> String {
        format!("{}:id:{}", scope, campaign_id)
    }

    // ============= Utility =============

    /// Extract the scope tag from a key
    pub fn scope_of(key: &str) -> Option<CacheScope> {
        key.split(':').next().and_then(|tag| tag.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants_key() {
        assert_eq!(
            CacheKey::participants("camp-1"),
            "campaign_participants:id:camp-1"
        );
    }

    #[test]
    fn test_campaign_list_and_detail_keys_do_not_collide() {
        let list = CacheKey::campaign_list("abc");
        let detail = CacheKey::campaign("abc");
        assert_eq!(list, "campaign_summary:user:abc");
        assert_eq!(detail, "campaign_summary:id:abc");
        assert_ne!(list, detail);
    }

    #[test]
    fn test_collection_keys() {
        assert_eq!(CacheKey::sessions("c"), "campaign_sessions:id:c");
        assert_eq!(CacheKey::characters("c"), "campaign_characters:id:c");
        assert_eq!(CacheKey::invites("c"), "campaign_invites:id:c");
    }

    #[test]
    fn test_scope_of() {
        assert_eq!(
            CacheKey::scope_of("campaign_invites:id:c"),
            Some(CacheScope::CampaignInvites)
        );
        assert_eq!(
            CacheKey::scope_of(&CacheKey::campaign_list("u")),
            Some(CacheScope::CampaignSummary)
        );
        assert_eq!(CacheKey::scope_of("v2:feed:123"), None);
    }
}
