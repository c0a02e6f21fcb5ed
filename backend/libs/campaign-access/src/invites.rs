//! Invite candidate calculation

use campaign_cache::models::{Contact, Invite, Participant};
use std::collections::{BTreeSet, HashSet};

/// Contacts of the campaign owner who could still be invited.
///
/// Excludes current participants and recipients of a pending invite; invites
/// that were claimed, revoked or expired do not block a new one. Blank ids are
/// dropped and the result is sorted without duplicates.
pub fn invite_candidates(
    contacts: &[Contact],
    participants: &[Participant],
    invites: &[Invite],
) -> Vec<String> {
    let mut excluded: HashSet<&str> = participants
        .iter()
        .map(|participant| participant.user_id.trim())
        .collect();
    excluded.extend(
        invites
            .iter()
            .filter(|invite| invite.is_pending())
            .map(|invite| invite.recipient_user_id.trim()),
    );

    contacts
        .iter()
        .map(|contact| contact.contact_user_id.trim())
        .filter(|user_id| !user_id.is_empty() && !excluded.contains(user_id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
