//! Pet care: the shop, the inventory, equipment, and renaming.
//!
//! Purchases debit exactly one currency (gems for premium items, gold
//! otherwise) and grant the item in the same transaction. Consumable use
//! applies the clamped stat effect and decrements the owned quantity,
//! deleting the inventory row at zero. Equipping upserts on (pet, slot),
//! so at most one item ever occupies a slot.

use warren_db::{CatalogStore, EquipmentStore, InventoryStore, PetStore};
use warren_pet::equipment::equip_slot;
use warren_pet::items::{plan_use, purchase_charge};
use warren_pet::stats;
use warren_types::{
    EquipmentSlot, EquippedItem, Pet, PetItem, PetItemId, UserId, UserPetItem, UserPetItemId,
};

use crate::engine::Engine;
use crate::error::EngineError;

/// The result of a shop purchase.
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    /// The item bought.
    pub item: PetItem,
    /// Human-readable confirmation.
    pub message: String,
    /// Gold balance after the purchase.
    pub gold: i64,
    /// Gem balance after the purchase.
    pub gems: i64,
}

impl Engine {
    /// Fetch the caller's pet.
    pub async fn get_pet(&self, user_id: UserId) -> Result<Pet, EngineError> {
        let mut tx = self.pool().begin().await?;
        let pet = Self::require_pet(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(pet)
    }

    /// Rename the caller's pet.
    pub async fn rename_pet(&self, user_id: UserId, name: &str) -> Result<Pet, EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::BadRequest(
                "Pet name must not be empty.".to_owned(),
            ));
        }
        let mut tx = self.pool().begin().await?;
        let pet = Self::require_pet(&mut tx, user_id).await?;
        PetStore::rename(&mut tx, pet.id, name).await?;
        tx.commit().await?;
        Ok(Pet {
            name: name.to_owned(),
            ..pet
        })
    }

    /// List the shop catalog.
    pub async fn list_shop(&self) -> Result<Vec<PetItem>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let items = CatalogStore::list(&mut tx).await?;
        tx.commit().await?;
        Ok(items)
    }

    /// List the caller's inventory.
    pub async fn list_inventory(&self, user_id: UserId) -> Result<Vec<UserPetItem>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let items = InventoryStore::list_for_user(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(items)
    }

    /// List everything equipped on the caller's pet.
    pub async fn list_equipped(&self, user_id: UserId) -> Result<Vec<EquippedItem>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let pet = Self::require_pet(&mut tx, user_id).await?;
        let equipped = EquipmentStore::list_for_pet(&mut tx, pet.id).await?;
        tx.commit().await?;
        Ok(equipped)
    }

    /// Buy one unit of a catalog item.
    ///
    /// Debits the charged currency and grants the item atomically; an
    /// unaffordable purchase is a Conflict and nothing changes.
    pub async fn buy_item(
        &self,
        user_id: UserId,
        item_id: PetItemId,
    ) -> Result<PurchaseOutcome, EngineError> {
        let mut tx = self.pool().begin().await?;

        let item = CatalogStore::fetch(&mut tx, item_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Item \"{item_id}\" not found.")))?;
        let user = Self::require_user(&mut tx, user_id).await?;

        let charge = purchase_charge(&item);
        let wallet = self
            .debit(
                &mut tx,
                &user,
                charge.currency,
                charge.amount,
                "SHOP_PURCHASE",
                Some(item_id.into_inner()),
            )
            .await?;
        InventoryStore::add_one(&mut tx, user_id, item_id).await?;
        tx.commit().await?;

        tracing::info!(user = %user_id, item = %item.name, ?charge, "Item purchased");

        Ok(PurchaseOutcome {
            message: format!("You bought {}!", item.name),
            item,
            gold: wallet.gold,
            gems: wallet.gems,
        })
    }

    /// Use one unit of an owned consumable on the pet.
    ///
    /// Applies the clamped stat effect and decrements the quantity,
    /// deleting the inventory row at zero -- one transaction.
    pub async fn use_item_on_pet(
        &self,
        user_id: UserId,
        owned_id: UserPetItemId,
    ) -> Result<Pet, EngineError> {
        let mut tx = self.pool().begin().await?;

        let owned = Self::require_owned_item(&mut tx, owned_id, user_id).await?;
        let item = CatalogStore::fetch(&mut tx, owned.item_id)
            .await?
            .ok_or_else(|| {
                EngineError::Internal(format!(
                    "inventory row {owned_id} references missing catalog item"
                ))
            })?;
        let mut pet = Self::require_pet(&mut tx, user_id).await?;

        let plan = plan_use(&owned, &item)?;
        stats::apply_raise(&mut pet, plan.stat, plan.amount);
        PetStore::update_stats(&mut tx, &pet).await?;

        if plan.delete_row {
            InventoryStore::delete(&mut tx, owned_id).await?;
        } else {
            InventoryStore::set_quantity(&mut tx, owned_id, plan.remaining_quantity).await?;
        }
        tx.commit().await?;

        tracing::info!(user = %user_id, item = %item.name, stat = ?plan.stat, "Item used on pet");
        Ok(pet)
    }

    /// Equip an owned customization item into its slot, replacing
    /// whatever held the slot.
    ///
    /// # Errors
    ///
    /// `BadRequest` for items without an equipment slot.
    pub async fn equip_item(
        &self,
        user_id: UserId,
        owned_id: UserPetItemId,
    ) -> Result<EquipmentSlot, EngineError> {
        let mut tx = self.pool().begin().await?;

        let owned = Self::require_owned_item(&mut tx, owned_id, user_id).await?;
        let item = CatalogStore::fetch(&mut tx, owned.item_id)
            .await?
            .ok_or_else(|| {
                EngineError::Internal(format!(
                    "inventory row {owned_id} references missing catalog item"
                ))
            })?;
        let pet = Self::require_pet(&mut tx, user_id).await?;

        let slot = equip_slot(&item)?;
        EquipmentStore::equip(&mut tx, pet.id, item.id, slot).await?;
        tx.commit().await?;

        tracing::info!(user = %user_id, item = %item.name, ?slot, "Item equipped");
        Ok(slot)
    }

    /// Clear an equipment slot on the caller's pet. Idempotent: clearing
    /// an empty slot succeeds and reports `false`.
    pub async fn unequip_item(
        &self,
        user_id: UserId,
        slot: EquipmentSlot,
    ) -> Result<bool, EngineError> {
        let mut tx = self.pool().begin().await?;
        let pet = Self::require_pet(&mut tx, user_id).await?;
        let removed = EquipmentStore::unequip(&mut tx, pet.id, slot).await?;
        tx.commit().await?;
        Ok(removed)
    }

    /// Load the caller's pet or fail with `NotFound`.
    pub(crate) async fn require_pet(
        conn: &mut sqlx::PgConnection,
        user_id: UserId,
    ) -> Result<Pet, EngineError> {
        PetStore::fetch_for_user(conn, user_id)
            .await?
            .ok_or_else(|| EngineError::NotFound("Pet not found.".to_owned()))
    }

    /// Load an inventory row and verify the caller owns it.
    async fn require_owned_item(
        conn: &mut sqlx::PgConnection,
        owned_id: UserPetItemId,
        user_id: UserId,
    ) -> Result<UserPetItem, EngineError> {
        let owned = InventoryStore::fetch(conn, owned_id)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound(format!("Inventory item \"{owned_id}\" not found."))
            })?;
        if owned.user_id != user_id {
            return Err(EngineError::Forbidden(
                "You do not have permission to use this item.".to_owned(),
            ));
        }
        Ok(owned)
    }
}
