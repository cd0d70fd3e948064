//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the tracker has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. All IDs use UUID v7
//! (time-ordered) for efficient database indexing.
//!
//! `PostgreSQL` inserts default to app-side generation via the `new()`
//! constructors; the `From` impls cover rows loaded back from the store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a user account.
    UserId
}

define_id! {
    /// Unique identifier for a habit.
    HabitId
}

define_id! {
    /// Unique identifier for a habit log entry.
    HabitLogId
}

define_id! {
    /// Unique identifier for a daily task.
    DailyId
}

define_id! {
    /// Unique identifier for a daily completion log entry.
    DailyLogId
}

define_id! {
    /// Unique identifier for a one-off to-do.
    TodoId
}

define_id! {
    /// Unique identifier for a user-defined redeemable reward.
    RewardId
}

define_id! {
    /// Unique identifier for a user's pet.
    PetId
}

define_id! {
    /// Unique identifier for a shop catalog item.
    PetItemId
}

define_id! {
    /// Unique identifier for an owned-item inventory row.
    UserPetItemId
}

define_id! {
    /// Unique identifier for an equipped-item row.
    EquippedItemId
}

define_id! {
    /// Unique identifier for a group.
    GroupId
}

define_id! {
    /// Unique identifier for a group membership row.
    MembershipId
}

define_id! {
    /// Unique identifier for a group chat message.
    GroupMessageId
}

define_id! {
    /// Unique identifier for a challenge.
    ChallengeId
}

define_id! {
    /// Unique identifier for a challenge participation row.
    ParticipationId
}

define_id! {
    /// Unique identifier for a currency ledger entry.
    CurrencyEntryId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let user = UserId::new();
        let habit = HabitId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(user.into_inner(), Uuid::nil());
        assert_ne!(habit.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = UserId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<UserId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(restored.is_ok());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = GroupId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
