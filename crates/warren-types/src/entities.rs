//! Entity structs for the Warren productivity tracker.
//!
//! One struct per persisted table. These are plain data carriers; the rules
//! that mutate them live in the `warren-tasks`, `warren-pet`,
//! `warren-social`, and `warren-ledger` crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    ChallengeStatus, Currency, Difficulty, EntryDirection, EquipmentSlot, HabitKind,
    MembershipRole, MembershipStatus, PetItemKind, PetStat, Visibility,
};
use crate::ids::{
    ChallengeId, CurrencyEntryId, DailyId, DailyLogId, EquippedItemId, GroupId, GroupMessageId,
    HabitId, HabitLogId, MembershipId, ParticipationId, PetId, PetItemId, RewardId, TodoId,
    UserId, UserPetItemId,
};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A user account with its currency balances.
///
/// Both balances are invariantly non-negative; every mutation goes through
/// the wallet operations in `warren-ledger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Display name, unique per account.
    pub username: String,
    /// Soft currency balance (never negative).
    pub gold: i64,
    /// Premium currency balance (never negative).
    pub gems: i64,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// A recurring habit with streak tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Habit {
    /// Habit identifier.
    pub id: HabitId,
    /// Owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Direction of the habit (build up, break down, or both).
    pub kind: HabitKind,
    /// Reward/cost tier.
    pub difficulty: Difficulty,
    /// Paused habits cannot be logged and are skipped by nightly expiry.
    pub is_paused: bool,
    /// Count of positive (completed) logs over the habit's lifetime.
    pub positive_counter: i64,
    /// Count of negative (missed) logs over the habit's lifetime.
    pub negative_counter: i64,
    /// Consecutive calendar days with a log; reset nightly when a day is
    /// missed.
    pub current_streak: i32,
    /// High-water mark of `current_streak`; monotonically non-decreasing.
    pub longest_streak: i32,
    /// While set and in the future, positive logs grant no gold.
    pub gold_reward_locked_until: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// An immutable record of one habit log.
///
/// Append-only; at most one log per habit per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HabitLog {
    /// Log identifier.
    pub id: HabitLogId,
    /// The habit this log belongs to.
    pub habit_id: HabitId,
    /// The logging user.
    pub user_id: UserId,
    /// Whether the habit was completed (positive) or missed (negative).
    pub completed: bool,
    /// Optional note attached at logging time.
    pub notes: Option<String>,
    /// When the log was recorded; its UTC calendar day is the streak day.
    pub logged_at: DateTime<Utc>,
}

/// A task that must be completed once per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Daily {
    /// Daily identifier.
    pub id: DailyId,
    /// Owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Reward tier.
    pub difficulty: Difficulty,
    /// Set on completion; reset to `false` by the nightly job.
    pub completed: bool,
    /// Timestamp of the most recent completion.
    pub last_completed: Option<DateTime<Utc>>,
    /// While set and in the future, completions grant no gold.
    pub gold_reward_locked_until: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// An immutable record of one daily completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DailyLog {
    /// Log identifier.
    pub id: DailyLogId,
    /// The daily this log belongs to.
    pub daily_id: DailyId,
    /// The completing user.
    pub user_id: UserId,
    /// Optional note attached at completion time.
    pub notes: Option<String>,
    /// When the completion was recorded.
    pub logged_at: DateTime<Utc>,
}

/// A one-off to-do; completion is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Todo {
    /// To-do identifier.
    pub id: TodoId,
    /// Owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Reward tier.
    pub difficulty: Difficulty,
    /// Terminal once `true` (until the row is deleted).
    pub completed: bool,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A user-defined redeemable reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Reward {
    /// Reward identifier.
    pub id: RewardId,
    /// Owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Gold price of one redemption.
    pub cost: i64,
    /// Timestamp of the most recent redemption.
    pub last_redeemed: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Pet & items
// ---------------------------------------------------------------------------

/// A user's virtual pet. Exactly one per user.
///
/// All four stats are bounded to [0, 100]; mutations go through the
/// clamped operations in `warren-pet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Pet {
    /// Pet identifier.
    pub id: PetId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// How well fed the pet is, [0, 100].
    pub hunger: i32,
    /// Mood, [0, 100]; raised by task completions.
    pub happiness: i32,
    /// Wellbeing, [0, 100].
    pub health: i32,
    /// Liveliness, [0, 100].
    pub energy: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A shop catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PetItem {
    /// Item identifier.
    pub id: PetItemId,
    /// Display name, unique in the catalog.
    pub name: String,
    /// Shop description.
    pub description: String,
    /// Item category.
    pub kind: PetItemKind,
    /// Price in the charged currency (gold, or gems when premium).
    pub cost: i64,
    /// Premium items are charged in gems instead of gold.
    pub is_premium: bool,
    /// The stat a consumable raises, if any.
    pub stat_effect: Option<PetStat>,
    /// Magnitude of the stat raise.
    pub effect_value: Option<i32>,
    /// Slot a customization item occupies when equipped.
    pub equipment_slot: Option<EquipmentSlot>,
}

/// Owned quantity of a catalog item. Deleted when quantity reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserPetItem {
    /// Inventory row identifier.
    pub id: UserPetItemId,
    /// Owning user.
    pub user_id: UserId,
    /// The catalog item owned.
    pub item_id: PetItemId,
    /// Owned count; invariantly at least 1.
    pub quantity: i32,
}

/// An item equipped on a pet. Unique per (pet, slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EquippedItem {
    /// Equipped row identifier.
    pub id: EquippedItemId,
    /// The pet wearing the item.
    pub pet_id: PetId,
    /// The catalog item equipped.
    pub item_id: PetItemId,
    /// The slot occupied.
    pub slot: EquipmentSlot,
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

/// A social group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Group {
    /// Group identifier.
    pub id: GroupId,
    /// Globally unique name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Public groups admit joiners immediately; private ones queue them.
    pub visibility: Visibility,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A user's membership in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GroupMembership {
    /// Membership row identifier.
    pub id: MembershipId,
    /// The member.
    pub user_id: UserId,
    /// The group.
    pub group_id: GroupId,
    /// Role within the group.
    pub role: MembershipRole,
    /// Pending (awaiting approval) or active.
    pub status: MembershipStatus,
    /// When the membership row was created.
    pub joined_at: DateTime<Utc>,
}

/// A chat message posted in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GroupMessage {
    /// Message identifier.
    pub id: GroupMessageId,
    /// The group the message was posted in.
    pub group_id: GroupId,
    /// The posting member.
    pub user_id: UserId,
    /// Message body.
    pub content: String,
    /// Post time.
    pub created_at: DateTime<Utc>,
}

/// A cooperative challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Challenge {
    /// Challenge identifier.
    pub id: ChallengeId,
    /// Creator; `None` for system-seeded public challenges.
    pub creator_id: Option<UserId>,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// What participants are trying to achieve.
    pub goal: String,
    /// Public challenges admit joiners immediately; private ones queue them.
    pub visibility: Visibility,
    /// Lifecycle status.
    pub status: ChallengeStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A user's participation in a challenge with per-user progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChallengeParticipation {
    /// Participation row identifier.
    pub id: ParticipationId,
    /// The participant.
    pub user_id: UserId,
    /// The challenge.
    pub challenge_id: ChallengeId,
    /// Pending (awaiting creator approval) or active.
    pub status: MembershipStatus,
    /// Progress toward the goal, in challenge-defined units.
    pub progress: i32,
    /// Whether this participant has finished the challenge.
    pub completed: bool,
    /// When the participant finished, set once.
    pub completion_time: Option<DateTime<Utc>>,
    /// When the participation row was created.
    pub joined_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Currency ledger
// ---------------------------------------------------------------------------

/// One append-only record of a currency credit or debit.
///
/// Every gold/gem mutation writes exactly one entry in the same transaction,
/// so an account's balance is reconstructable from its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CurrencyEntry {
    /// Entry identifier.
    pub id: CurrencyEntryId,
    /// The account mutated.
    pub user_id: UserId,
    /// Which balance was touched.
    pub currency: Currency,
    /// Credit (increase) or debit (decrease).
    pub direction: EntryDirection,
    /// Magnitude of the change; strictly positive.
    pub amount: i64,
    /// Human-readable reason (e.g. "HABIT_REWARD", "SHOP_PURCHASE").
    pub reason: String,
    /// Optional reference to the entity that caused the change.
    pub reference_id: Option<uuid::Uuid>,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_habit() -> Habit {
        Habit {
            id: HabitId::new(),
            user_id: UserId::new(),
            title: "Exercise".to_owned(),
            notes: None,
            kind: HabitKind::Positive,
            difficulty: Difficulty::Medium,
            is_paused: false,
            positive_counter: 0,
            negative_counter: 0,
            current_streak: 0,
            longest_streak: 0,
            gold_reward_locked_until: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn habit_roundtrip_serde() {
        let habit = sample_habit();
        let json = serde_json::to_string(&habit).ok();
        assert!(json.is_some());
        let restored: Result<Habit, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(habit));
    }

    #[test]
    fn currency_entry_roundtrip_serde() {
        let entry = CurrencyEntry {
            id: CurrencyEntryId::new(),
            user_id: UserId::new(),
            currency: Currency::Gold,
            direction: EntryDirection::Credit,
            amount: 10,
            reason: "HABIT_REWARD".to_owned(),
            reference_id: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&entry).ok();
        let restored: Result<CurrencyEntry, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(entry));
    }
}
