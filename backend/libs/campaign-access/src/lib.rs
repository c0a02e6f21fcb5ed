//! Campaign access
//!
//! Membership and listing logic on top of the campaign cache:
//! - Collaborator traits for the auth, game-state and connections services
//! - Page-token aggregation with repeated-token detection
//! - Fail-closed membership resolution with a bounded introspection timeout
//! - Invite candidate calculation
//! - Read-through campaign reads and invalidating writes

mod campaigns;
mod collaborators;
mod config;
mod directory;
mod error;
mod invites;
mod membership;

pub mod pagination;

pub use campaigns::CampaignWorkflow;
pub use collaborators::{
    CampaignService, ContactLister, Introspection, InviteLister, NewCampaign, Page,
    ParticipantLister, TokenIntrospector,
};
pub use config::AccessConfig;
pub use directory::CampaignDirectory;
pub use error::{AccessError, AccessResult, RemoteErrorKind};
pub use invites::invite_candidates;
pub use membership::{MembershipDecision, MembershipResolver};
pub use pagination::collect_all_pages;

/// Trimmed identifier, or `InvalidArgument` naming what is missing
pub(crate) fn required<'a>(value: &'a str, what: &str) -> AccessResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AccessError::InvalidArgument(format!("{} is required", what)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required(" camp-1 ", "campaign id").unwrap(), "camp-1");
        match required("\t", "campaign id") {
            Err(AccessError::InvalidArgument(message)) => {
                assert_eq!(message, "campaign id is required")
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
