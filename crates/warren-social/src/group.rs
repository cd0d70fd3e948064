//! Group lifecycle rules and gold costs.
//!
//! Creating a group charges a flat fee and seats the creator as an active
//! OWNER. Deleting one is owner-only and charges a steeper fee. Leaving is
//! open to everyone except the owner (ownership transfer is unsupported;
//! the owner deletes instead).

use warren_types::{MembershipRole, MembershipStatus};

use crate::error::SocialError;

/// Gold charged to create a group.
pub const GROUP_CREATION_COST: i64 = 150;

/// Gold charged to delete a group (owner only).
pub const GROUP_DELETION_COST: i64 = 500;

/// Whether a member may update the group's name/description/visibility.
pub const fn can_update(role: MembershipRole, status: MembershipStatus) -> bool {
    matches!(status, MembershipStatus::Active)
        && matches!(role, MembershipRole::Owner | MembershipRole::Admin)
}

/// Whether a member may delete the group.
pub const fn can_delete(role: MembershipRole) -> bool {
    matches!(role, MembershipRole::Owner)
}

/// Whether a member may read and post chat messages.
///
/// Pending members are not yet in the room.
pub const fn can_chat(status: MembershipStatus) -> bool {
    matches!(status, MembershipStatus::Active)
}

/// Validate that a member may leave the group.
///
/// # Errors
///
/// Returns [`SocialError::OwnerCannotLeave`] for the owner -- the
/// exactly-one-owner invariant would otherwise break.
pub const fn validate_leave(role: MembershipRole) -> Result<(), SocialError> {
    match role {
        MembershipRole::Owner => Err(SocialError::OwnerCannotLeave),
        MembershipRole::Admin | MembershipRole::Member => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use warren_types::MembershipRole::{Admin, Member, Owner};

    #[test]
    fn creation_and_deletion_costs() {
        assert_eq!(GROUP_CREATION_COST, 150);
        assert_eq!(GROUP_DELETION_COST, 500);
    }

    #[test]
    fn owner_and_admin_update_member_does_not() {
        assert!(can_update(Owner, MembershipStatus::Active));
        assert!(can_update(Admin, MembershipStatus::Active));
        assert!(!can_update(Member, MembershipStatus::Active));
        assert!(!can_update(Admin, MembershipStatus::Pending));
    }

    #[test]
    fn only_owner_deletes() {
        assert!(can_delete(Owner));
        assert!(!can_delete(Admin));
        assert!(!can_delete(Member));
    }

    #[test]
    fn chat_is_active_members_only() {
        assert!(can_chat(MembershipStatus::Active));
        assert!(!can_chat(MembershipStatus::Pending));
    }

    #[test]
    fn everyone_but_the_owner_may_leave() {
        assert!(validate_leave(Member).is_ok());
        assert!(validate_leave(Admin).is_ok());
        assert_eq!(validate_leave(Owner), Err(SocialError::OwnerCannotLeave));
    }
}
