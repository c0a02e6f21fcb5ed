//! Campaign event reconciliation
//!
//! An external poller fetches new events from a campaign's event log and hands
//! them to [`CampaignEventReconciler::reconcile`]. Each event flags the cache
//! scopes it affects as stale, then the campaign cursor is compare-and-advanced
//! past the last applied event.
//!
//! ```text
//! poller ──events──▶ reconcile ──mark_campaign_scope_stale──▶ CacheStore
//!                         └──────put_campaign_event_cursor──────▶
//! ```

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{normalize_id, CacheError, CacheResult, CacheScope, CacheStore, CampaignEventCursor};

/// Event classes that matter to cached views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignEventKind {
    CampaignUpdated,
    ParticipantChanged,
    SessionChanged,
    CharacterChanged,
    InviteChanged,
    /// Anything unrecognised invalidates every scope
    Other(String),
}

impl CampaignEventKind {
    pub fn affected_scopes(&self) -> &'static [CacheScope] {
        match self {
            CampaignEventKind::CampaignUpdated => &[CacheScope::CampaignSummary],
            CampaignEventKind::ParticipantChanged => &[
                CacheScope::CampaignParticipants,
                CacheScope::CampaignSummary,
            ],
            CampaignEventKind::SessionChanged => &[CacheScope::CampaignSessions],
            CampaignEventKind::CharacterChanged => &[CacheScope::CampaignCharacters],
            // A claimed invite also adds a participant
            CampaignEventKind::InviteChanged => &[
                CacheScope::CampaignInvites,
                CacheScope::CampaignParticipants,
            ],
            CampaignEventKind::Other(_) => &CacheScope::ALL,
        }
    }
}

impl From<&str> for CampaignEventKind {
    fn from(event_type: &str) -> Self {
        match event_type.split('.').next().unwrap_or_default() {
            "campaign" => CampaignEventKind::CampaignUpdated,
            "participant" => CampaignEventKind::ParticipantChanged,
            "session" => CampaignEventKind::SessionChanged,
            "character" => CampaignEventKind::CharacterChanged,
            "invite" => CampaignEventKind::InviteChanged,
            _ => CampaignEventKind::Other(event_type.to_string()),
        }
    }
}

/// One entry of a campaign's upstream event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignEvent {
    /// Starts at 1; 0 is the position of a cursor that has seen nothing
    pub sequence: u64,
    pub kind: CampaignEventKind,
    pub observed_at: DateTime<Utc>,
}

impl CampaignEvent {
    pub fn new(sequence: u64, event_type: &str, observed_at: DateTime<Utc>) -> Self {
        Self {
            sequence,
            kind: CampaignEventKind::from(event_type),
            observed_at,
        }
    }
}

#[derive(Clone)]
pub struct CampaignEventReconciler {
    store: Arc<dyn CacheStore>,
}

impl CampaignEventReconciler {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Campaigns the poller should keep watching
    pub async fn tracked_campaigns(&self) -> CacheResult<Vec<String>> {
        self.store.list_tracked_campaign_ids().await
    }

    /// Apply newly observed events and return the cursor position afterwards.
    ///
    /// Events at or below the stored cursor are ignored, so redelivered
    /// batches are harmless. Sequence 0 is below every cursor and is never
    /// applied. A campaign seen for the first time gets a cursor even when
    /// `events` is empty.
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub async fn reconcile(&self, campaign_id: &str, events: &[CampaignEvent]) -> CacheResult<u64> {
        let campaign_id = normalize_id(campaign_id)
            .ok_or_else(|| CacheError::InvalidData("campaign id is required".to_string()))?;

        let cursor = self.store.get_campaign_event_cursor(campaign_id).await?;
        let start = cursor.as_ref().map(|c| c.last_sequence).unwrap_or(0);

        let unsequenced = events.iter().filter(|event| event.sequence == 0).count();
        if unsequenced > 0 {
            warn!(campaign_id = %campaign_id, unsequenced, "Skipping events without a sequence");
        }

        let mut pending: Vec<&CampaignEvent> =
            events.iter().filter(|event| event.sequence > start).collect();
        pending.sort_by_key(|event| event.sequence);

        let mut position = start;
        let mut marked = 0u64;
        for event in pending {
            for scope in event.kind.affected_scopes() {
                marked += self
                    .store
                    .mark_campaign_scope_stale(campaign_id, *scope, event.sequence, event.observed_at)
                    .await?;
            }
            position = event.sequence;
        }

        if cursor.is_none() || position > start {
            let advanced = self
                .store
                .put_campaign_event_cursor(&CampaignEventCursor::new(
                    campaign_id,
                    position,
                    Utc::now(),
                ))
                .await?;
            if advanced {
                info!(campaign_id = %campaign_id, from = start, to = position, marked, "Campaign cursor advanced");
            } else {
                // Another reconciler got further first
                debug!(campaign_id = %campaign_id, position, "Campaign cursor already ahead");
            }
        }

        Ok(position)
    }
}
