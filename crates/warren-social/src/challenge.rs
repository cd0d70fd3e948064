//! Challenge lifecycle rules and gold costs.
//!
//! Challenges mirror group join semantics (public joins are immediate,
//! private ones queue for creator approval) with a flatter permission
//! model: the creator is the only moderator. System-seeded public
//! challenges have no creator and therefore no moderator or deleter.

use warren_types::{Challenge, UserId};

/// Gold charged to create a challenge.
pub const CHALLENGE_CREATION_COST: i64 = 150;

/// Whether `user` may delete `challenge`.
///
/// Only the creator may; system-seeded challenges (no creator) cannot be
/// deleted through the engine.
pub fn can_delete(challenge: &Challenge, user: UserId) -> bool {
    challenge.creator_id == Some(user)
}

/// Whether `user` may approve or reject pending join requests.
///
/// Mirrors [`can_delete`]: moderation of a challenge is creator-only.
pub fn can_moderate(challenge: &Challenge, user: UserId) -> bool {
    challenge.creator_id == Some(user)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use warren_types::{ChallengeId, ChallengeStatus, Visibility};

    fn challenge(creator_id: Option<UserId>) -> Challenge {
        Challenge {
            id: ChallengeId::new(),
            creator_id,
            title: "30-Day Fitness Challenge".to_owned(),
            description: "Work out every day for 30 days.".to_owned(),
            goal: "Log 30 fitness activities.".to_owned(),
            visibility: Visibility::Public,
            status: ChallengeStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn creator_may_delete_and_moderate() {
        let creator = UserId::new();
        let c = challenge(Some(creator));
        assert!(can_delete(&c, creator));
        assert!(can_moderate(&c, creator));
    }

    #[test]
    fn non_creator_may_not() {
        let c = challenge(Some(UserId::new()));
        let stranger = UserId::new();
        assert!(!can_delete(&c, stranger));
        assert!(!can_moderate(&c, stranger));
    }

    #[test]
    fn seeded_challenges_have_no_moderator() {
        let c = challenge(None);
        let anyone = UserId::new();
        assert!(!can_delete(&c, anyone));
        assert!(!can_moderate(&c, anyone));
    }
}
