//! Shared type definitions for the Warren productivity tracker.
//!
//! This crate is the single source of truth for all types used across the
//! Warren workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the web frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (difficulty, currencies, roles, statuses)
//! - [`entities`] -- Entity structs (users, tasks, pet, items, social records)

pub mod entities;
pub mod enums;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use entities::{
    Challenge, ChallengeParticipation, CurrencyEntry, Daily, DailyLog, EquippedItem, Group,
    GroupMembership, GroupMessage, Habit, HabitLog, Pet, PetItem, Reward, Todo, User,
    UserPetItem,
};
pub use enums::{
    ChallengeStatus, Currency, Difficulty, EntryDirection, EquipmentSlot, HabitKind,
    MembershipRole, MembershipStatus, PetItemKind, PetStat, Visibility,
};
pub use ids::{
    ChallengeId, CurrencyEntryId, DailyId, DailyLogId, EquippedItemId, GroupId, GroupMessageId,
    HabitId, HabitLogId, MembershipId, ParticipationId, PetId, PetItemId, RewardId, TodoId,
    UserId, UserPetItemId,
};
