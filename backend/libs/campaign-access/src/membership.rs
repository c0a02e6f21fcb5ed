//! Campaign membership resolution
//!
//! Answers "is the bearer of this token a participant of this campaign?".
//! Fails closed: anything short of an active token whose user appears in the
//! aggregated roster is a denial, while remote failures surface as errors so
//! callers never mistake an outage for "not a member".

use campaign_cache::models::Participant;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::{AccessConfig, AccessError, AccessResult, CampaignDirectory, TokenIntrospector};

/// Result of a membership check
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MembershipDecision {
    /// Resolved user, empty when the token could not be resolved
    pub user_id: String,
    pub participant: Option<Participant>,
}

impl MembershipDecision {
    pub fn is_participant(&self) -> bool {
        self.participant.is_some()
    }
}

#[derive(Clone)]
pub struct MembershipResolver {
    introspector: Arc<dyn TokenIntrospector>,
    directory: CampaignDirectory,
    config: AccessConfig,
}

impl MembershipResolver {
    pub fn new(
        introspector: Arc<dyn TokenIntrospector>,
        directory: CampaignDirectory,
        config: AccessConfig,
    ) -> Self {
        Self {
            introspector,
            directory,
            config,
        }
    }

    /// User id behind an access token, `None` for a blank or inactive token
    #[instrument(skip(self, access_token))]
    pub async fn resolve_user_id(&self, access_token: &str) -> AccessResult<Option<String>> {
        let access_token = access_token.trim();
        if access_token.is_empty() {
            return Ok(None);
        }

        let limit = self.config.introspection_timeout;
        let introspection = match timeout(limit, self.introspector.introspect(access_token)).await {
            Ok(Ok(introspection)) => introspection,
            Ok(Err(status)) => {
                warn!(code = ?status.code(), "Token introspection failed");
                return Err(AccessError::identity(status));
            }
            Err(_) => {
                warn!(timeout_ms = limit.as_millis() as u64, "Token introspection timed out");
                return Err(AccessError::IdentityTimeout(limit));
            }
        };

        let user_id = introspection.user_id.trim();
        if !introspection.active || user_id.is_empty() {
            debug!(active = introspection.active, "Token does not resolve to a user");
            return Ok(None);
        }
        Ok(Some(user_id.to_string()))
    }

    #[instrument(skip(self, access_token))]
    pub async fn is_campaign_participant(
        &self,
        access_token: &str,
        campaign_id: &str,
    ) -> AccessResult<MembershipDecision> {
        if campaign_id.trim().is_empty() {
            return Ok(MembershipDecision::default());
        }
        let Some(user_id) = self.resolve_user_id(access_token).await? else {
            return Ok(MembershipDecision::default());
        };

        let participant = self
            .directory
            .participant_for_user(campaign_id, &user_id)
            .await?;
        debug!(
            user_id = %user_id,
            is_participant = participant.is_some(),
            "Membership resolved"
        );
        Ok(MembershipDecision {
            user_id,
            participant,
        })
    }
}
