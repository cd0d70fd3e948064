//! Enumeration types for the Warren productivity tracker.
//!
//! Every tag field in the data model is a closed enum with exhaustive
//! matching downstream -- reward tables, permission checks, and store
//! codecs all match on these variants rather than open strings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Task difficulty
// ---------------------------------------------------------------------------

/// Difficulty tier of a habit, daily, or to-do.
///
/// Drives the reward tables and the paid-mutation cost tables. Variants are
/// ordered from easiest to hardest; [`Difficulty::rank`] exposes that order
/// for upgrade/downgrade decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Difficulty {
    /// Barely an effort; the smallest rewards.
    Trivial,
    /// A light task.
    Easy,
    /// A solid piece of work.
    Medium,
    /// A serious commitment; the largest rewards and steepest exit costs.
    Hard,
}

impl Difficulty {
    /// Numeric rank of the tier (0 = easiest, 3 = hardest).
    ///
    /// A change to a higher rank is an upgrade (free, gold-locked);
    /// a change to a lower rank is a paid downgrade.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Trivial => 0,
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Habit kind
// ---------------------------------------------------------------------------

/// Direction of a habit: built up, broken down, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum HabitKind {
    /// A habit to build; only positive logs are expected.
    Positive,
    /// A habit to break; only negative logs are expected.
    Negative,
    /// Tracks both directions.
    Both,
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// A spendable currency on a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Currency {
    /// Soft currency earned by completing tasks.
    Gold,
    /// Premium currency; granted sparingly, spent on premium items.
    Gems,
}

/// Direction of a currency ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EntryDirection {
    /// Balance increased (task reward, refund).
    Credit,
    /// Balance decreased (purchase, fee, redemption).
    Debit,
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// A pet stat, each bounded to the range [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PetStat {
    /// How well fed the pet is.
    Hunger,
    /// The pet's mood; raised by task completions.
    Happiness,
    /// Overall wellbeing.
    Health,
    /// Liveliness.
    Energy,
}

/// Category of a shop catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PetItemKind {
    /// Consumable that primarily restores hunger.
    Food,
    /// Consumable that primarily raises happiness.
    Treat,
    /// Consumable plaything.
    Toy,
    /// Cosmetic; equippable into a slot, no stat effect.
    Customization,
}

/// Equipment slot on a pet. At most one item may be equipped per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EquipmentSlot {
    /// Headwear.
    Hat,
    /// Eyewear.
    Glasses,
    /// Scene behind the pet.
    Background,
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

/// Visibility of a group or challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Visibility {
    /// Anyone may join immediately.
    Public,
    /// Joining creates a pending request awaiting approval.
    Private,
}

/// Role of a member within a group.
///
/// Exactly one member holds [`MembershipRole::Owner`] at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MembershipRole {
    /// The creator; full control including deletion and role management.
    Owner,
    /// Moderator; may approve/reject requests and kick plain members.
    Admin,
    /// Ordinary member.
    Member,
}

/// Status of a group membership or challenge participation.
///
/// Transitions: `Pending -> Active` (approve), `Pending -> gone` (reject),
/// `Active -> gone` (leave/kick). Nothing returns to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MembershipStatus {
    /// Awaiting approval by a moderator (private groups/challenges).
    Pending,
    /// Full member.
    Active,
}

/// Lifecycle status of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ChallengeStatus {
    /// Created but not yet started.
    Pending,
    /// Running.
    Active,
    /// Finished.
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_rank_is_strictly_increasing() {
        assert!(Difficulty::Trivial.rank() < Difficulty::Easy.rank());
        assert!(Difficulty::Easy.rank() < Difficulty::Medium.rank());
        assert!(Difficulty::Medium.rank() < Difficulty::Hard.rank());
    }

    #[test]
    fn enums_roundtrip_serde() {
        let json = serde_json::to_string(&Difficulty::Medium).ok();
        assert!(json.is_some());
        let restored: Result<Difficulty, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(Difficulty::Medium));

        let json = serde_json::to_string(&MembershipStatus::Pending).ok();
        let restored: Result<MembershipStatus, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(MembershipStatus::Pending));
    }
}
