//! Error types for the social crate.

use warren_types::{MembershipRole, MembershipStatus};

/// Errors that can occur during membership state transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SocialError {
    /// The acting member's role does not permit the action.
    #[error("role {actor:?} may not perform this action on a {target:?}")]
    InsufficientRole {
        /// The acting member's role.
        actor: MembershipRole,
        /// The target member's role.
        target: MembershipRole,
    },

    /// Only pending memberships can be approved or rejected.
    #[error("membership is {status:?}, expected a pending request")]
    NotPending {
        /// The membership's actual status.
        status: MembershipStatus,
    },

    /// The owner cannot leave while owning the group.
    #[error("the owner cannot leave the group; delete it instead")]
    OwnerCannotLeave,

    /// Role management may not touch the owner role.
    #[error("the owner role cannot be assigned or removed")]
    OwnerRoleImmutable,
}
