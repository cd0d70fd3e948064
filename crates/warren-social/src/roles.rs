//! The role/permission matrix for group moderation.
//!
//! The hierarchy is OWNER > ADMIN > MEMBER:
//!
//! - approve/reject of pending requests: active OWNER or ADMIN
//! - kick: OWNER may kick ADMIN or MEMBER; ADMIN may kick only MEMBER;
//!   MEMBER may kick nobody; nobody kicks the OWNER
//! - role management: only the OWNER, and never to or from the OWNER role
//!
//! All checks are pure functions over the closed role/status enums so the
//! matrix is exhaustively testable.

use warren_types::{MembershipRole, MembershipStatus, Visibility};

use crate::error::SocialError;

/// Whether a member may moderate join requests (approve/reject).
///
/// Requires an active OWNER or ADMIN membership; pending moderators have
/// no powers yet.
pub const fn can_moderate(role: MembershipRole, status: MembershipStatus) -> bool {
    matches!(status, MembershipStatus::Active)
        && matches!(role, MembershipRole::Owner | MembershipRole::Admin)
}

/// Whether `actor` may kick `target` out of the group.
pub const fn can_kick(actor: MembershipRole, target: MembershipRole) -> bool {
    match actor {
        MembershipRole::Owner => !matches!(target, MembershipRole::Owner),
        MembershipRole::Admin => matches!(target, MembershipRole::Member),
        MembershipRole::Member => false,
    }
}

/// Validate a role change of `target_role` to `new_role` performed by
/// `actor_role`.
///
/// # Errors
///
/// Returns [`SocialError::InsufficientRole`] unless the actor is the
/// OWNER, and [`SocialError::OwnerRoleImmutable`] when the change would
/// assign or remove the OWNER role.
pub const fn validate_role_change(
    actor_role: MembershipRole,
    target_role: MembershipRole,
    new_role: MembershipRole,
) -> Result<(), SocialError> {
    if !matches!(actor_role, MembershipRole::Owner) {
        return Err(SocialError::InsufficientRole {
            actor: actor_role,
            target: target_role,
        });
    }
    if matches!(target_role, MembershipRole::Owner) || matches!(new_role, MembershipRole::Owner) {
        return Err(SocialError::OwnerRoleImmutable);
    }
    Ok(())
}

/// The membership status a joiner starts with, by visibility.
///
/// Public groups/challenges admit immediately; private ones queue a
/// pending request.
pub const fn join_status(visibility: Visibility) -> MembershipStatus {
    match visibility {
        Visibility::Public => MembershipStatus::Active,
        Visibility::Private => MembershipStatus::Pending,
    }
}

/// Validate the PENDING -> ACTIVE approval transition.
///
/// # Errors
///
/// Returns [`SocialError::NotPending`] when the membership is not pending
/// (nothing ever returns to pending, so approving twice is invalid).
pub const fn approve_transition(status: MembershipStatus) -> Result<MembershipStatus, SocialError> {
    match status {
        MembershipStatus::Pending => Ok(MembershipStatus::Active),
        MembershipStatus::Active => Err(SocialError::NotPending { status }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use warren_types::MembershipRole::{Admin, Member, Owner};

    #[test]
    fn moderation_requires_active_owner_or_admin() {
        assert!(can_moderate(Owner, MembershipStatus::Active));
        assert!(can_moderate(Admin, MembershipStatus::Active));
        assert!(!can_moderate(Member, MembershipStatus::Active));
        assert!(!can_moderate(Owner, MembershipStatus::Pending));
        assert!(!can_moderate(Admin, MembershipStatus::Pending));
    }

    #[test]
    fn owner_kicks_everyone_but_owner() {
        assert!(can_kick(Owner, Admin));
        assert!(can_kick(Owner, Member));
        assert!(!can_kick(Owner, Owner));
    }

    #[test]
    fn admin_kicks_only_members() {
        assert!(can_kick(Admin, Member));
        assert!(!can_kick(Admin, Admin));
        assert!(!can_kick(Admin, Owner));
    }

    #[test]
    fn member_kicks_nobody() {
        assert!(!can_kick(Member, Member));
        assert!(!can_kick(Member, Admin));
        assert!(!can_kick(Member, Owner));
    }

    #[test]
    fn only_owner_manages_roles() {
        assert!(validate_role_change(Owner, Member, Admin).is_ok());
        assert!(validate_role_change(Owner, Admin, Member).is_ok());
        assert!(matches!(
            validate_role_change(Admin, Member, Admin),
            Err(SocialError::InsufficientRole { .. })
        ));
        assert!(matches!(
            validate_role_change(Member, Member, Admin),
            Err(SocialError::InsufficientRole { .. })
        ));
    }

    #[test]
    fn owner_role_is_immutable() {
        assert_eq!(
            validate_role_change(Owner, Owner, Member),
            Err(SocialError::OwnerRoleImmutable)
        );
        assert_eq!(
            validate_role_change(Owner, Member, Owner),
            Err(SocialError::OwnerRoleImmutable)
        );
    }

    #[test]
    fn public_join_is_immediate_private_is_pending() {
        assert_eq!(join_status(Visibility::Public), MembershipStatus::Active);
        assert_eq!(join_status(Visibility::Private), MembershipStatus::Pending);
    }

    #[test]
    fn approval_transitions_pending_to_active_once() {
        assert_eq!(
            approve_transition(MembershipStatus::Pending),
            Ok(MembershipStatus::Active)
        );
        assert_eq!(
            approve_transition(MembershipStatus::Active),
            Err(SocialError::NotPending {
                status: MembershipStatus::Active,
            })
        );
    }
}
