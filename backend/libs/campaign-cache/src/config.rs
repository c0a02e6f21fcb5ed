//! Cache configuration
//!
//! Loaded from environment variables; every value has a development default.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::store::{CacheStore, InMemoryCacheStore, PgCacheStore};
use crate::{CacheError, CacheResult, CacheScope};

/// Time-to-live per cached view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub campaign_list: Duration,
    pub campaign: Duration,
    pub participants: Duration,
    pub sessions: Duration,
    pub characters: Duration,
    pub invites: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            campaign_list: Duration::from_secs(30),
            campaign: Duration::from_secs(300),
            participants: Duration::from_secs(10),
            sessions: Duration::from_secs(10),
            characters: Duration::from_secs(30),
            invites: Duration::from_secs(10),
        }
    }
}

impl CacheTtls {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            campaign_list: env_secs("CAMPAIGN_CACHE_TTL_CAMPAIGN_LIST_SECS", defaults.campaign_list),
            campaign: env_secs("CAMPAIGN_CACHE_TTL_CAMPAIGN_SECS", defaults.campaign),
            participants: env_secs("CAMPAIGN_CACHE_TTL_PARTICIPANTS_SECS", defaults.participants),
            sessions: env_secs("CAMPAIGN_CACHE_TTL_SESSIONS_SECS", defaults.sessions),
            characters: env_secs("CAMPAIGN_CACHE_TTL_CHARACTERS_SECS", defaults.characters),
            invites: env_secs("CAMPAIGN_CACHE_TTL_INVITES_SECS", defaults.invites),
        }
    }

    /// Collection TTL for a campaign-bound scope. The summary scope holds both
    /// list and detail views, which have their own fields.
    pub fn for_collection(&self, scope: CacheScope) -> Duration {
        match scope {
            CacheScope::CampaignSummary => self.campaign,
            CacheScope::CampaignParticipants => self.participants,
            CacheScope::CampaignSessions => self.sessions,
            CacheScope::CampaignCharacters => self.characters,
            CacheScope::CampaignInvites => self.invites,
        }
    }
}

fn env_secs(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Cache configuration
#[derive(Clone)]
pub struct CacheConfig {
    /// Postgres URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub ttls: CacheTtls,
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("ttls", &self.ttls)
            .finish()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            connect_timeout: Duration::from_secs(5),
            ttls: CacheTtls::default(),
        }
    }
}

impl CacheConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: std::env::var("CAMPAIGN_CACHE_DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            max_connections: std::env::var("CAMPAIGN_CACHE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            connect_timeout: env_secs(
                "CAMPAIGN_CACHE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout,
            ),
            ttls: CacheTtls::from_env(),
        }
    }

    /// Build the configured store. Postgres stores are migrated before use.
    pub async fn connect(&self) -> CacheResult<Arc<dyn CacheStore>> {
        match &self.database_url {
            Some(url) => {
                if self.max_connections == 0 {
                    return Err(CacheError::Configuration(
                        "CAMPAIGN_CACHE_MAX_CONNECTIONS must be positive".to_string(),
                    ));
                }
                let store =
                    PgCacheStore::connect(url, self.max_connections, self.connect_timeout).await?;
                store.migrate().await?;
                info!("Campaign cache using Postgres store");
                Ok(Arc::new(store))
            }
            None => {
                info!("Campaign cache using in-memory store");
                Ok(Arc::new(InMemoryCacheStore::new()))
            }
        }
    }
}
