//! Shop pricing and consumable-use planning.
//!
//! Purchases charge exactly one currency: gems for premium items, gold for
//! everything else. Consumable use applies the item's stat effect (clamped)
//! and decrements the owned quantity, deleting the inventory row when it
//! reaches zero.

use serde::{Deserialize, Serialize};

use warren_types::{Currency, PetItem, PetStat, UserPetItem};

use crate::error::PetError;

/// The currency and amount a purchase debits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseCharge {
    /// The charged currency.
    pub currency: Currency,
    /// The price in that currency.
    pub amount: i64,
}

/// The charge for buying one unit of `item`.
///
/// Premium items are charged in gems, all others in gold -- never a blend.
pub const fn purchase_charge(item: &PetItem) -> PurchaseCharge {
    let currency = if item.is_premium {
        Currency::Gems
    } else {
        Currency::Gold
    };
    PurchaseCharge {
        currency,
        amount: item.cost,
    }
}

/// The planned effect of using one unit of a consumable on the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseItemPlan {
    /// The stat the item raises.
    pub stat: PetStat,
    /// Magnitude of the raise (applied clamped).
    pub amount: i32,
    /// Owned quantity after consuming one unit.
    pub remaining_quantity: i32,
    /// Whether the inventory row should be deleted (quantity hit zero).
    pub delete_row: bool,
}

/// Plan the use of one unit of `item` from the inventory row `owned`.
///
/// # Errors
///
/// Returns [`PetError::NotConsumable`] for items without a stat effect
/// (customization items are equipped, not consumed) and
/// [`PetError::InvalidQuantity`] if the inventory row's quantity is below 1.
pub fn plan_use(owned: &UserPetItem, item: &PetItem) -> Result<UseItemPlan, PetError> {
    let (stat, amount) = match (item.stat_effect, item.effect_value) {
        (Some(stat), Some(value)) => (stat, value),
        _ => return Err(PetError::NotConsumable { kind: item.kind }),
    };

    if owned.quantity < 1 {
        return Err(PetError::InvalidQuantity {
            quantity: owned.quantity,
        });
    }
    let remaining_quantity = owned.quantity.saturating_sub(1);

    Ok(UseItemPlan {
        stat,
        amount,
        remaining_quantity,
        delete_row: remaining_quantity == 0,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use warren_types::{PetItemId, PetItemKind, UserId, UserPetItemId};

    fn apple() -> PetItem {
        PetItem {
            id: PetItemId::new(),
            name: "Apple".to_owned(),
            description: "A crunchy, healthy fruit.".to_owned(),
            kind: PetItemKind::Food,
            cost: 5,
            is_premium: false,
            stat_effect: Some(PetStat::Hunger),
            effect_value: Some(10),
            equipment_slot: None,
        }
    }

    fn top_hat() -> PetItem {
        PetItem {
            id: PetItemId::new(),
            name: "Top Hat".to_owned(),
            description: "A very fancy top hat.".to_owned(),
            kind: PetItemKind::Customization,
            cost: 100,
            is_premium: false,
            stat_effect: None,
            effect_value: None,
            equipment_slot: Some(warren_types::EquipmentSlot::Hat),
        }
    }

    fn owned(item: &PetItem, quantity: i32) -> UserPetItem {
        UserPetItem {
            id: UserPetItemId::new(),
            user_id: UserId::new(),
            item_id: item.id,
            quantity,
        }
    }

    #[test]
    fn regular_item_charges_gold() {
        let charge = purchase_charge(&apple());
        assert_eq!(charge.currency, Currency::Gold);
        assert_eq!(charge.amount, 5);
    }

    #[test]
    fn premium_item_charges_gems() {
        let mut item = apple();
        item.is_premium = true;
        item.cost = 3;
        let charge = purchase_charge(&item);
        assert_eq!(charge.currency, Currency::Gems);
        assert_eq!(charge.amount, 3);
    }

    #[test]
    fn using_a_consumable_decrements_quantity() {
        let item = apple();
        let plan = plan_use(&owned(&item, 2), &item).unwrap();
        assert_eq!(plan.stat, PetStat::Hunger);
        assert_eq!(plan.amount, 10);
        assert_eq!(plan.remaining_quantity, 1);
        assert!(!plan.delete_row);
    }

    #[test]
    fn last_unit_deletes_the_row() {
        let item = apple();
        let plan = plan_use(&owned(&item, 1), &item).unwrap();
        assert_eq!(plan.remaining_quantity, 0);
        assert!(plan.delete_row);
    }

    #[test]
    fn customization_items_cannot_be_consumed() {
        let item = top_hat();
        let result = plan_use(&owned(&item, 1), &item);
        assert_eq!(
            result,
            Err(PetError::NotConsumable {
                kind: PetItemKind::Customization,
            })
        );
    }

    #[test]
    fn zero_quantity_row_is_invalid() {
        let item = apple();
        let result = plan_use(&owned(&item, 0), &item);
        assert_eq!(result, Err(PetError::InvalidQuantity { quantity: 0 }));
    }
}
