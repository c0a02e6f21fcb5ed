//! Access configuration
//!
//! Loaded from environment variables; every value has a default.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessConfig {
    /// Upper bound for token introspection, independent of the caller
    pub introspection_timeout: Duration,
    pub participant_page_size: u32,
    pub contact_page_size: u32,
    pub invite_page_size: u32,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            introspection_timeout: Duration::from_millis(3000),
            participant_page_size: 10,
            contact_page_size: 50,
            invite_page_size: 50,
        }
    }
}

impl AccessConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            introspection_timeout: std::env::var("CAMPAIGN_ACCESS_INTROSPECTION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.introspection_timeout),
            participant_page_size: env_page_size(
                "CAMPAIGN_ACCESS_PARTICIPANT_PAGE_SIZE",
                defaults.participant_page_size,
            ),
            contact_page_size: env_page_size(
                "CAMPAIGN_ACCESS_CONTACT_PAGE_SIZE",
                defaults.contact_page_size,
            ),
            invite_page_size: env_page_size(
                "CAMPAIGN_ACCESS_INVITE_PAGE_SIZE",
                defaults.invite_page_size,
            ),
        }
    }
}

/// Zero would ask the remote for its own default, so it is rejected
fn env_page_size(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(default)
}
