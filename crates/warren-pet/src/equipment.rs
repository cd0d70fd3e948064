//! Equipment slot validation.
//!
//! Only items carrying an equipment slot can be equipped; at most one item
//! occupies a slot per pet (the store upserts on the (pet, slot) key).
//! Unequipping is an idempotent delete handled by the store.

use warren_types::{EquipmentSlot, PetItem};

use crate::error::PetError;

/// The slot `item` occupies when equipped.
///
/// # Errors
///
/// Returns [`PetError::NotEquippable`] for items without a slot
/// (consumables and slotless customizations).
pub const fn equip_slot(item: &PetItem) -> Result<EquipmentSlot, PetError> {
    match item.equipment_slot {
        Some(slot) => Ok(slot),
        None => Err(PetError::NotEquippable { kind: item.kind }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use warren_types::{PetItemId, PetItemKind, PetStat};

    fn item(kind: PetItemKind, slot: Option<EquipmentSlot>) -> PetItem {
        PetItem {
            id: PetItemId::new(),
            name: "Item".to_owned(),
            description: String::new(),
            kind,
            cost: 10,
            is_premium: false,
            stat_effect: if slot.is_none() {
                Some(PetStat::Hunger)
            } else {
                None
            },
            effect_value: if slot.is_none() { Some(10) } else { None },
            equipment_slot: slot,
        }
    }

    #[test]
    fn customization_with_slot_is_equippable() {
        let hat = item(PetItemKind::Customization, Some(EquipmentSlot::Hat));
        assert_eq!(equip_slot(&hat), Ok(EquipmentSlot::Hat));
    }

    #[test]
    fn food_is_not_equippable() {
        let food = item(PetItemKind::Food, None);
        assert_eq!(
            equip_slot(&food),
            Err(PetError::NotEquippable {
                kind: PetItemKind::Food,
            })
        );
    }

    #[test]
    fn background_slot_is_carried_through() {
        let scene = item(PetItemKind::Customization, Some(EquipmentSlot::Background));
        assert_eq!(equip_slot(&scene), Ok(EquipmentSlot::Background));
    }
}
