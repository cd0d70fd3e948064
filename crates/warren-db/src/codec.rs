//! Closed-enum <-> database string conversions.
//!
//! Every enum column in the schema is a `PostgreSQL` enum type; values are
//! bound as `TEXT` and cast in SQL, and selected back with a `::TEXT`
//! cast. The `*_to_db` functions are total; the `*_from_db` functions
//! reject anything outside the closed variant set with
//! [`StoreError::InvalidEnum`] rather than inventing a default.

use warren_types::{
    ChallengeStatus, Currency, Difficulty, EntryDirection, EquipmentSlot, HabitKind,
    MembershipRole, MembershipStatus, PetItemKind, PetStat, Visibility,
};

use crate::error::StoreError;

/// Convert a [`Difficulty`] to its database string.
pub const fn difficulty_to_db(value: Difficulty) -> &'static str {
    match value {
        Difficulty::Trivial => "trivial",
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}

/// Parse a [`Difficulty`] from its database string.
pub fn difficulty_from_db(value: &str) -> Result<Difficulty, StoreError> {
    match value {
        "trivial" => Ok(Difficulty::Trivial),
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => Err(StoreError::InvalidEnum {
            column: "difficulty",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`HabitKind`] to its database string.
pub const fn habit_kind_to_db(value: HabitKind) -> &'static str {
    match value {
        HabitKind::Positive => "positive",
        HabitKind::Negative => "negative",
        HabitKind::Both => "both",
    }
}

/// Parse a [`HabitKind`] from its database string.
pub fn habit_kind_from_db(value: &str) -> Result<HabitKind, StoreError> {
    match value {
        "positive" => Ok(HabitKind::Positive),
        "negative" => Ok(HabitKind::Negative),
        "both" => Ok(HabitKind::Both),
        other => Err(StoreError::InvalidEnum {
            column: "habit_kind",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`Currency`] to its database string.
pub const fn currency_to_db(value: Currency) -> &'static str {
    match value {
        Currency::Gold => "gold",
        Currency::Gems => "gems",
    }
}

/// Parse a [`Currency`] from its database string.
pub fn currency_from_db(value: &str) -> Result<Currency, StoreError> {
    match value {
        "gold" => Ok(Currency::Gold),
        "gems" => Ok(Currency::Gems),
        other => Err(StoreError::InvalidEnum {
            column: "currency",
            value: other.to_owned(),
        }),
    }
}

/// Convert an [`EntryDirection`] to its database string.
pub const fn entry_direction_to_db(value: EntryDirection) -> &'static str {
    match value {
        EntryDirection::Credit => "credit",
        EntryDirection::Debit => "debit",
    }
}

/// Parse an [`EntryDirection`] from its database string.
pub fn entry_direction_from_db(value: &str) -> Result<EntryDirection, StoreError> {
    match value {
        "credit" => Ok(EntryDirection::Credit),
        "debit" => Ok(EntryDirection::Debit),
        other => Err(StoreError::InvalidEnum {
            column: "entry_direction",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`PetItemKind`] to its database string.
pub const fn pet_item_kind_to_db(value: PetItemKind) -> &'static str {
    match value {
        PetItemKind::Food => "food",
        PetItemKind::Treat => "treat",
        PetItemKind::Toy => "toy",
        PetItemKind::Customization => "customization",
    }
}

/// Parse a [`PetItemKind`] from its database string.
pub fn pet_item_kind_from_db(value: &str) -> Result<PetItemKind, StoreError> {
    match value {
        "food" => Ok(PetItemKind::Food),
        "treat" => Ok(PetItemKind::Treat),
        "toy" => Ok(PetItemKind::Toy),
        "customization" => Ok(PetItemKind::Customization),
        other => Err(StoreError::InvalidEnum {
            column: "pet_item_kind",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`PetStat`] to its database string.
pub const fn pet_stat_to_db(value: PetStat) -> &'static str {
    match value {
        PetStat::Hunger => "hunger",
        PetStat::Happiness => "happiness",
        PetStat::Health => "health",
        PetStat::Energy => "energy",
    }
}

/// Parse a [`PetStat`] from its database string.
pub fn pet_stat_from_db(value: &str) -> Result<PetStat, StoreError> {
    match value {
        "hunger" => Ok(PetStat::Hunger),
        "happiness" => Ok(PetStat::Happiness),
        "health" => Ok(PetStat::Health),
        "energy" => Ok(PetStat::Energy),
        other => Err(StoreError::InvalidEnum {
            column: "pet_stat",
            value: other.to_owned(),
        }),
    }
}

/// Convert an [`EquipmentSlot`] to its database string.
pub const fn equipment_slot_to_db(value: EquipmentSlot) -> &'static str {
    match value {
        EquipmentSlot::Hat => "hat",
        EquipmentSlot::Glasses => "glasses",
        EquipmentSlot::Background => "background",
    }
}

/// Parse an [`EquipmentSlot`] from its database string.
pub fn equipment_slot_from_db(value: &str) -> Result<EquipmentSlot, StoreError> {
    match value {
        "hat" => Ok(EquipmentSlot::Hat),
        "glasses" => Ok(EquipmentSlot::Glasses),
        "background" => Ok(EquipmentSlot::Background),
        other => Err(StoreError::InvalidEnum {
            column: "equipment_slot",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`Visibility`] to its database string.
pub const fn visibility_to_db(value: Visibility) -> &'static str {
    match value {
        Visibility::Public => "public",
        Visibility::Private => "private",
    }
}

/// Parse a [`Visibility`] from its database string.
pub fn visibility_from_db(value: &str) -> Result<Visibility, StoreError> {
    match value {
        "public" => Ok(Visibility::Public),
        "private" => Ok(Visibility::Private),
        other => Err(StoreError::InvalidEnum {
            column: "visibility",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`MembershipRole`] to its database string.
pub const fn membership_role_to_db(value: MembershipRole) -> &'static str {
    match value {
        MembershipRole::Owner => "owner",
        MembershipRole::Admin => "admin",
        MembershipRole::Member => "member",
    }
}

/// Parse a [`MembershipRole`] from its database string.
pub fn membership_role_from_db(value: &str) -> Result<MembershipRole, StoreError> {
    match value {
        "owner" => Ok(MembershipRole::Owner),
        "admin" => Ok(MembershipRole::Admin),
        "member" => Ok(MembershipRole::Member),
        other => Err(StoreError::InvalidEnum {
            column: "membership_role",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`MembershipStatus`] to its database string.
pub const fn membership_status_to_db(value: MembershipStatus) -> &'static str {
    match value {
        MembershipStatus::Pending => "pending",
        MembershipStatus::Active => "active",
    }
}

/// Parse a [`MembershipStatus`] from its database string.
pub fn membership_status_from_db(value: &str) -> Result<MembershipStatus, StoreError> {
    match value {
        "pending" => Ok(MembershipStatus::Pending),
        "active" => Ok(MembershipStatus::Active),
        other => Err(StoreError::InvalidEnum {
            column: "membership_status",
            value: other.to_owned(),
        }),
    }
}

/// Convert a [`ChallengeStatus`] to its database string.
pub const fn challenge_status_to_db(value: ChallengeStatus) -> &'static str {
    match value {
        ChallengeStatus::Pending => "pending",
        ChallengeStatus::Active => "active",
        ChallengeStatus::Completed => "completed",
    }
}

/// Parse a [`ChallengeStatus`] from its database string.
pub fn challenge_status_from_db(value: &str) -> Result<ChallengeStatus, StoreError> {
    match value {
        "pending" => Ok(ChallengeStatus::Pending),
        "active" => Ok(ChallengeStatus::Active),
        "completed" => Ok(ChallengeStatus::Completed),
        other => Err(StoreError::InvalidEnum {
            column: "challenge_status",
            value: other.to_owned(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_roundtrips() {
        for value in [
            Difficulty::Trivial,
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
        ] {
            assert_eq!(difficulty_from_db(difficulty_to_db(value)).unwrap(), value);
        }
    }

    #[test]
    fn role_and_status_roundtrip() {
        for value in [
            MembershipRole::Owner,
            MembershipRole::Admin,
            MembershipRole::Member,
        ] {
            assert_eq!(
                membership_role_from_db(membership_role_to_db(value)).unwrap(),
                value
            );
        }
        for value in [MembershipStatus::Pending, MembershipStatus::Active] {
            assert_eq!(
                membership_status_from_db(membership_status_to_db(value)).unwrap(),
                value
            );
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(difficulty_from_db("legendary").is_err());
        assert!(membership_role_from_db("superadmin").is_err());
        assert!(equipment_slot_from_db("shoes").is_err());
        assert!(currency_from_db("doubloons").is_err());
    }
}
