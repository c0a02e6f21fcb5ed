//! Cache entry and event cursor records

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::CacheError;

/// Kind of data held by an entry. Drives bulk invalidation and metric labels,
/// never key uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheScope {
    CampaignSummary,
    CampaignParticipants,
    CampaignSessions,
    CampaignCharacters,
    CampaignInvites,
}

impl CacheScope {
    pub const ALL: [CacheScope; 5] = [
        CacheScope::CampaignSummary,
        CacheScope::CampaignParticipants,
        CacheScope::CampaignSessions,
        CacheScope::CampaignCharacters,
        CacheScope::CampaignInvites,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheScope::CampaignSummary => "campaign_summary",
            CacheScope::CampaignParticipants => "campaign_participants",
            CacheScope::CampaignSessions => "campaign_sessions",
            CacheScope::CampaignCharacters => "campaign_characters",
            CacheScope::CampaignInvites => "campaign_invites",
        }
    }
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheScope {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheScope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| CacheError::InvalidData(format!("unknown cache scope: {}", s)))
    }
}

/// A persisted response snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub cache_key: String,
    pub scope: CacheScope,
    /// Empty when the scope is not campaign-bound
    pub campaign_id: String,
    /// Empty when the scope is not user-bound
    pub user_id: String,
    /// Encoded snapshot; opaque to the store
    pub payload: Vec<u8>,
    pub stale: bool,
    /// Highest campaign event sequence already applied to this entry
    pub stale_event_sequence: u64,
    pub checked_at: DateTime<Utc>,
    pub refreshed_at: DateTime<Utc>,
    /// `None` never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Fresh entry as written after a successful remote fetch.
    ///
    /// An expiry past the representable date range is left unset.
    pub fn fresh(
        cache_key: impl Into<String>,
        scope: CacheScope,
        payload: Vec<u8>,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            cache_key: cache_key.into(),
            scope,
            campaign_id: String::new(),
            user_id: String::new(),
            payload,
            stale: false,
            stale_event_sequence: 0,
            checked_at: now,
            refreshed_at: now,
            expires_at: now.checked_add_signed(ttl),
        }
    }

    pub fn with_campaign(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = campaign_id.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    /// An entry may be served only when it is not stale, not expired and
    /// carries a payload.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.stale && !self.is_expired(now) && !self.payload.is_empty()
    }
}

/// How far a campaign's upstream event stream has been reconciled against the
/// cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignEventCursor {
    pub campaign_id: String,
    pub last_sequence: u64,
    pub updated_at: DateTime<Utc>,
}

impl CampaignEventCursor {
    pub fn new(campaign_id: impl Into<String>, last_sequence: u64, updated_at: DateTime<Utc>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            last_sequence,
            updated_at,
        }
    }
}
