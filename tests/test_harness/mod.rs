//! Test Harness Module
//!
//! In-process fakes for the remote collaborators, plus builders wiring them
//! into the campaign libraries over an in-memory cache store:
//! - Game service (campaigns, participants, sessions, characters, invites)
//! - Connections service (contacts)
//! - Auth service (token introspection)

#![allow(dead_code)]

use async_trait::async_trait;
use campaign_web::campaign_access::{
    AccessConfig, CampaignDirectory, CampaignService, CampaignWorkflow, ContactLister,
    Introspection, InviteLister, MembershipResolver, NewCampaign, Page, ParticipantLister,
    TokenIntrospector,
};
use campaign_web::campaign_cache::models::{
    Campaign, Character, Contact, Invite, InviteStatus, Participant, ParticipantRole, Session,
};
use campaign_web::campaign_cache::{
    CacheTtls, CampaignCache, CampaignEventReconciler, InMemoryCacheStore,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tonic::Status;

/// Route library logs to the test output; `RUST_LOG` narrows them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn participant(id: &str, campaign_id: &str, user_id: &str) -> Participant {
    Participant {
        id: id.to_string(),
        campaign_id: campaign_id.to_string(),
        user_id: user_id.to_string(),
        display_name: format!("User {}", user_id),
        role: ParticipantRole::Player as i32,
    }
}

pub fn invite(campaign_id: &str, recipient_user_id: &str, status: InviteStatus) -> Invite {
    Invite {
        id: format!("inv-{}", recipient_user_id),
        campaign_id: campaign_id.to_string(),
        participant_id: String::new(),
        recipient_user_id: recipient_user_id.to_string(),
        status: status as i32,
    }
}

/// Game service state; every listing call is counted
#[derive(Default)]
pub struct FakeGameService {
    campaigns: Mutex<Vec<Campaign>>,
    participants: Mutex<HashMap<String, Vec<Participant>>>,
    sessions: Mutex<HashMap<String, Vec<Session>>>,
    invites: Mutex<HashMap<String, Vec<Invite>>>,
    /// Page tokens that loop back to the first page
    cyclic_tokens: Mutex<bool>,
    next_id: AtomicUsize,
    pub campaign_calls: AtomicUsize,
    pub participant_calls: AtomicUsize,
    pub session_calls: AtomicUsize,
    pub invite_calls: AtomicUsize,
    pub requested_tokens: Mutex<Vec<String>>,
}

impl FakeGameService {
    pub fn add_campaign(&self, id: &str, owner_user_id: &str) {
        self.campaigns.lock().unwrap().push(Campaign {
            id: id.to_string(),
            name: format!("Campaign {}", id),
            owner_user_id: owner_user_id.to_string(),
            game_system: "daggerheart".to_string(),
            ..Default::default()
        });
    }

    pub fn add_participant(&self, campaign_id: &str, user_id: &str) {
        let mut participants = self.participants.lock().unwrap();
        let roster = participants.entry(campaign_id.to_string()).or_default();
        let id = format!("p{}", roster.len() + 1);
        roster.push(participant(&id, campaign_id, user_id));
    }

    pub fn add_session(&self, campaign_id: &str, name: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        let list = sessions.entry(campaign_id.to_string()).or_default();
        list.push(Session {
            id: format!("s{}", list.len() + 1),
            campaign_id: campaign_id.to_string(),
            name: name.to_string(),
            ..Default::default()
        });
    }

    pub fn add_invite(&self, invite: Invite) {
        self.invites
            .lock()
            .unwrap()
            .entry(invite.campaign_id.clone())
            .or_default()
            .push(invite);
    }

    pub fn make_pagination_cyclic(&self) {
        *self.cyclic_tokens.lock().unwrap() = true;
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CampaignService for FakeGameService {
    async fn list_campaigns(&self, user_id: &str) -> Result<Vec<Campaign>, Status> {
        self.campaign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .filter(|campaign| campaign.owner_user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign, Status> {
        self.campaign_calls.fetch_add(1, Ordering::SeqCst);
        self.campaigns
            .lock()
            .unwrap()
            .iter()
            .find(|campaign| campaign.id == campaign_id)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("campaign {} not found", campaign_id)))
    }

    async fn list_sessions(&self, campaign_id: &str) -> Result<Vec<Session>, Status> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(campaign_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_characters(&self, _campaign_id: &str) -> Result<Vec<Character>, Status> {
        Ok(Vec::new())
    }

    async fn create_campaign(
        &self,
        owner_user_id: &str,
        input: &NewCampaign,
    ) -> Result<Campaign, Status> {
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let campaign = Campaign {
            id,
            name: input.name.clone(),
            owner_user_id: owner_user_id.to_string(),
            game_system: input.game_system.clone(),
            ..Default::default()
        };
        self.campaigns.lock().unwrap().push(campaign.clone());
        Ok(campaign)
    }
}

#[async_trait]
impl ParticipantLister for FakeGameService {
    async fn list_participants(
        &self,
        campaign_id: &str,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<Participant>, Status> {
        self.participant_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_tokens
            .lock()
            .unwrap()
            .push(page_token.to_string());

        let roster = self
            .participants
            .lock()
            .unwrap()
            .get(campaign_id)
            .cloned()
            .unwrap_or_default();
        let offset: usize = if page_token.is_empty() {
            0
        } else {
            page_token
                .trim_start_matches("offset-")
                .parse()
                .map_err(|_| Status::invalid_argument("bad page token"))?
        };
        let end = (offset + page_size as usize).min(roster.len());
        let items = roster[offset.min(end)..end].to_vec();

        let next_page_token = if end >= roster.len() {
            String::new()
        } else if *self.cyclic_tokens.lock().unwrap() {
            "offset-0".to_string()
        } else {
            format!("offset-{}", end)
        };
        Ok(Page::with_next(items, next_page_token))
    }
}

#[async_trait]
impl InviteLister for FakeGameService {
    async fn list_invites(&self, campaign_id: &str, page_size: u32) -> Result<Vec<Invite>, Status> {
        self.invite_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .invites
            .lock()
            .unwrap()
            .get(campaign_id)
            .map(|invites| invites.iter().take(page_size as usize).cloned().collect())
            .unwrap_or_default())
    }
}

/// Connections service keyed by owner
#[derive(Default)]
pub struct FakeConnections {
    contacts: Mutex<HashMap<String, Vec<Contact>>>,
}

impl FakeConnections {
    pub fn add_contact(&self, owner_user_id: &str, contact_user_id: &str) {
        self.contacts
            .lock()
            .unwrap()
            .entry(owner_user_id.to_string())
            .or_default()
            .push(Contact {
                owner_user_id: owner_user_id.to_string(),
                contact_user_id: contact_user_id.to_string(),
                display_name: format!("User {}", contact_user_id),
            });
    }
}

#[async_trait]
impl ContactLister for FakeConnections {
    async fn list_contacts(
        &self,
        owner_user_id: &str,
        _page_size: u32,
        _page_token: &str,
    ) -> Result<Page<Contact>, Status> {
        Ok(Page::last(
            self.contacts
                .lock()
                .unwrap()
                .get(owner_user_id)
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

/// Auth service with a fixed token table
#[derive(Default)]
pub struct FakeAuth {
    tokens: Mutex<HashMap<String, Introspection>>,
    pub calls: AtomicUsize,
}

impl FakeAuth {
    pub fn issue(&self, token: &str, user_id: &str, active: bool) {
        self.tokens.lock().unwrap().insert(
            token.to_string(),
            Introspection {
                active,
                user_id: user_id.to_string(),
            },
        );
    }
}

#[async_trait]
impl TokenIntrospector for FakeAuth {
    async fn introspect(&self, access_token: &str) -> Result<Introspection, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .unwrap_or_default())
    }
}

/// Everything a web handler would hold, sharing one cache store
pub struct TestEnvironment {
    pub store: Arc<InMemoryCacheStore>,
    pub game: Arc<FakeGameService>,
    pub connections: Arc<FakeConnections>,
    pub auth: Arc<FakeAuth>,
    pub cache: CampaignCache,
    pub workflow: CampaignWorkflow,
    pub directory: CampaignDirectory,
    pub resolver: MembershipResolver,
    pub reconciler: CampaignEventReconciler,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::with(CacheTtls::default(), AccessConfig::default())
    }

    pub fn with(ttls: CacheTtls, config: AccessConfig) -> Self {
        init_tracing();

        let store = Arc::new(InMemoryCacheStore::new());
        let game = Arc::new(FakeGameService::default());
        let connections = Arc::new(FakeConnections::default());
        let auth = Arc::new(FakeAuth::default());
        let cache = CampaignCache::new(store.clone(), ttls);

        let workflow = CampaignWorkflow::new(game.clone(), cache.clone());
        let directory = CampaignDirectory::new(
            game.clone(),
            connections.clone(),
            game.clone(),
            cache.clone(),
            config,
        );
        let resolver = MembershipResolver::new(auth.clone(), directory.clone(), config);
        let reconciler = CampaignEventReconciler::new(store.clone());

        Self {
            store,
            game,
            connections,
            auth,
            cache,
            workflow,
            directory,
            resolver,
            reconciler,
        }
    }
}
