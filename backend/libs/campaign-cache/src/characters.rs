//! Character list caching

use crate::models::{Character, CharacterList};
use crate::{normalize_id, CacheKey, CacheScope, CampaignCache};

impl CampaignCache {
    pub async fn cached_characters(&self, campaign_id: &str) -> Option<Vec<Character>> {
        self.cached_for_campaign::<CharacterList>(CacheScope::CampaignCharacters, campaign_id)
            .await
            .map(|list| list.characters)
    }

    pub async fn set_characters_cache(&self, campaign_id: &str, characters: &[Character]) {
        let list = CharacterList {
            characters: characters.to_vec(),
        };
        self.set_for_campaign(CacheScope::CampaignCharacters, campaign_id, &list)
            .await;
    }

    pub async fn invalidate_characters(&self, campaign_id: &str) {
        if let Some(campaign_id) = normalize_id(campaign_id) {
            self.invalidate(&CacheKey::characters(campaign_id)).await;
        }
    }
}
