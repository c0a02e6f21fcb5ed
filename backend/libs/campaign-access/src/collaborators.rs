//! Remote collaborator contracts
//!
//! Implemented by the gRPC clients of the auth, game-state and connections
//! services. Failures are returned as the raw `tonic::Status`; classification
//! happens in [`crate::RemoteErrorKind`].

use async_trait::async_trait;
use campaign_cache::models::{Campaign, Character, Contact, Invite, Participant, Session};
use tonic::Status;

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Empty on the last page
    pub next_page_token: String,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: String::new(),
        }
    }

    pub fn with_next(items: Vec<T>, next_page_token: impl Into<String>) -> Self {
        Self {
            items,
            next_page_token: next_page_token.into(),
        }
    }
}

/// Outcome of bearer token introspection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Introspection {
    pub active: bool,
    pub user_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    async fn introspect(&self, access_token: &str) -> Result<Introspection, Status>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantLister: Send + Sync {
    async fn list_participants(
        &self,
        campaign_id: &str,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<Participant>, Status>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactLister: Send + Sync {
    async fn list_contacts(
        &self,
        owner_user_id: &str,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<Contact>, Status>;
}

/// Invites are listed as a single bounded page
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteLister: Send + Sync {
    async fn list_invites(&self, campaign_id: &str, page_size: u32) -> Result<Vec<Invite>, Status>;
}

/// Input for creating a campaign
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCampaign {
    pub name: String,
    pub game_system: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignService: Send + Sync {
    async fn list_campaigns(&self, user_id: &str) -> Result<Vec<Campaign>, Status>;

    async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign, Status>;

    async fn list_sessions(&self, campaign_id: &str) -> Result<Vec<Session>, Status>;

    async fn list_characters(&self, campaign_id: &str) -> Result<Vec<Character>, Status>;

    async fn create_campaign(
        &self,
        owner_user_id: &str,
        input: &NewCampaign,
    ) -> Result<Campaign, Status>;
}
