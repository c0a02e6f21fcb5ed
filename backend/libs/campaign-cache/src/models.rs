//! Snapshot messages stored in cache payloads
//!
//! These mirror the game-state and connections service responses. They are
//! `prost` messages so payloads use the same schema-stable binary encoding the
//! remote services speak; adding fields with new tags keeps old payloads
//! decodable.

/// Campaign summary / detail
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Campaign {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub owner_user_id: String,
    #[prost(string, tag = "4")]
    pub game_system: String,
    #[prost(int32, tag = "5")]
    pub participant_count: i32,
    #[prost(int32, tag = "6")]
    pub character_count: i32,
    #[prost(int64, tag = "7")]
    pub updated_at_unix: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CampaignList {
    #[prost(message, repeated, tag = "1")]
    pub campaigns: Vec<Campaign>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ParticipantRole {
    Unspecified = 0,
    Gm = 1,
    Player = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Participant {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub campaign_id: String,
    #[prost(string, tag = "3")]
    pub user_id: String,
    #[prost(string, tag = "4")]
    pub display_name: String,
    #[prost(enumeration = "ParticipantRole", tag = "5")]
    pub role: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ParticipantList {
    #[prost(message, repeated, tag = "1")]
    pub participants: Vec<Participant>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SessionStatus {
    Unspecified = 0,
    Active = 1,
    Ended = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Session {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub campaign_id: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(enumeration = "SessionStatus", tag = "4")]
    pub status: i32,
    #[prost(int64, tag = "5")]
    pub started_at_unix: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SessionList {
    #[prost(message, repeated, tag = "1")]
    pub sessions: Vec<Session>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Character {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub campaign_id: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub kind: String,
    #[prost(string, tag = "5")]
    pub owner_participant_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CharacterList {
    #[prost(message, repeated, tag = "1")]
    pub characters: Vec<Character>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum InviteStatus {
    Unspecified = 0,
    Pending = 1,
    Claimed = 2,
    Revoked = 3,
    Expired = 4,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Invite {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub campaign_id: String,
    #[prost(string, tag = "3")]
    pub participant_id: String,
    #[prost(string, tag = "4")]
    pub recipient_user_id: String,
    #[prost(enumeration = "InviteStatus", tag = "5")]
    pub status: i32,
}

impl Invite {
    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending as i32
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InviteList {
    #[prost(message, repeated, tag = "1")]
    pub invites: Vec<Invite>,
}

/// Connection between the acting user and another user
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Contact {
    #[prost(string, tag = "1")]
    pub owner_user_id: String,
    #[prost(string, tag = "2")]
    pub contact_user_id: String,
    #[prost(string, tag = "3")]
    pub display_name: String,
}
