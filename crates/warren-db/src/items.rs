//! Persistence for the item catalog, user inventories, and equipment.
//!
//! Three stores share this module because they share the item codec and
//! are always touched together by the shop/inventory engine operations.

use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{
    EquipmentSlot, EquippedItem, EquippedItemId, PetId, PetItem, PetItemId, UserId, UserPetItem,
    UserPetItemId,
};

use crate::codec::{
    equipment_slot_from_db, equipment_slot_to_db, pet_item_kind_from_db, pet_item_kind_to_db,
    pet_stat_from_db, pet_stat_to_db,
};
use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Operations on the `pet_items` catalog table.
pub struct CatalogStore;

/// A row from the `pet_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct PetItemRow {
    id: Uuid,
    name: String,
    description: String,
    kind: String,
    cost: i64,
    is_premium: bool,
    stat_effect: Option<String>,
    effect_value: Option<i32>,
    equipment_slot: Option<String>,
}

impl PetItemRow {
    fn into_domain(self) -> Result<PetItem, StoreError> {
        Ok(PetItem {
            id: PetItemId::from(self.id),
            name: self.name,
            description: self.description,
            kind: pet_item_kind_from_db(&self.kind)?,
            cost: self.cost,
            is_premium: self.is_premium,
            stat_effect: self
                .stat_effect
                .as_deref()
                .map(pet_stat_from_db)
                .transpose()?,
            effect_value: self.effect_value,
            equipment_slot: self
                .equipment_slot
                .as_deref()
                .map(equipment_slot_from_db)
                .transpose()?,
        })
    }
}

const SELECT_ITEM: &str = r"SELECT id, name, description, kind::TEXT as kind, cost,
       is_premium, stat_effect::TEXT as stat_effect, effect_value,
       equipment_slot::TEXT as equipment_slot
  FROM pet_items";

impl CatalogStore {
    /// Insert a catalog item (seeding and admin tooling).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert(conn: &mut PgConnection, item: &PetItem) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO pet_items (id, name, description, kind, cost, is_premium,
                                     stat_effect, effect_value, equipment_slot)
              VALUES ($1, $2, $3, $4::pet_item_kind, $5, $6, $7::pet_stat, $8, $9::equipment_slot)",
        )
        .bind(item.id.into_inner())
        .bind(&item.name)
        .bind(&item.description)
        .bind(pet_item_kind_to_db(item.kind))
        .bind(item.cost)
        .bind(item.is_premium)
        .bind(item.stat_effect.map(pet_stat_to_db))
        .bind(item.effect_value)
        .bind(item.equipment_slot.map(equipment_slot_to_db))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a catalog item by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch(
        conn: &mut PgConnection,
        id: PetItemId,
    ) -> Result<Option<PetItem>, StoreError> {
        let row = sqlx::query_as::<_, PetItemRow>(&format!("{SELECT_ITEM} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        row.map(PetItemRow::into_domain).transpose()
    }

    /// List the whole catalog, by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<PetItem>, StoreError> {
        let rows = sqlx::query_as::<_, PetItemRow>(&format!("{SELECT_ITEM} ORDER BY name"))
            .fetch_all(&mut *conn)
            .await?;
        rows.into_iter().map(PetItemRow::into_domain).collect()
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Operations on the `user_pet_items` inventory table.
pub struct InventoryStore;

/// A row from the `user_pet_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct InventoryRow {
    id: Uuid,
    user_id: Uuid,
    item_id: Uuid,
    quantity: i32,
}

impl From<InventoryRow> for UserPetItem {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: UserPetItemId::from(row.id),
            user_id: UserId::from(row.user_id),
            item_id: PetItemId::from(row.item_id),
            quantity: row.quantity,
        }
    }
}

impl InventoryStore {
    /// Fetch an inventory row by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn fetch(
        conn: &mut PgConnection,
        id: UserPetItemId,
    ) -> Result<Option<UserPetItem>, StoreError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r"SELECT id, user_id, item_id, quantity FROM user_pet_items WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(UserPetItem::from))
    }

    /// List a user's inventory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<UserPetItem>, StoreError> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r"SELECT id, user_id, item_id, quantity FROM user_pet_items WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(UserPetItem::from).collect())
    }

    /// Add one unit of an item to a user's inventory, creating the row or
    /// incrementing its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the upsert fails.
    pub async fn add_one(
        conn: &mut PgConnection,
        user_id: UserId,
        item_id: PetItemId,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO user_pet_items (id, user_id, item_id, quantity)
              VALUES ($1, $2, $3, 1)
              ON CONFLICT (user_id, item_id)
              DO UPDATE SET quantity = user_pet_items.quantity + 1",
        )
        .bind(UserPetItemId::new().into_inner())
        .bind(user_id.into_inner())
        .bind(item_id.into_inner())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Set an inventory row's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails (the schema
    /// rejects quantities below 1; delete the row instead).
    pub async fn set_quantity(
        conn: &mut PgConnection,
        id: UserPetItemId,
        quantity: i32,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE user_pet_items SET quantity = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(quantity)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete an inventory row (its quantity reached zero).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete(conn: &mut PgConnection, id: UserPetItemId) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM user_pet_items WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// Operations on the `equipped_items` table.
pub struct EquipmentStore;

/// A row from the `equipped_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct EquippedRow {
    id: Uuid,
    pet_id: Uuid,
    item_id: Uuid,
    slot: String,
}

impl EquippedRow {
    fn into_domain(self) -> Result<EquippedItem, StoreError> {
        Ok(EquippedItem {
            id: EquippedItemId::from(self.id),
            pet_id: PetId::from(self.pet_id),
            item_id: PetItemId::from(self.item_id),
            slot: equipment_slot_from_db(&self.slot)?,
        })
    }
}

impl EquipmentStore {
    /// Equip an item into a slot, replacing whatever held the slot before.
    ///
    /// Upserts on the (pet, slot) unique key, so exactly one row per slot
    /// survives.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the upsert fails.
    pub async fn equip(
        conn: &mut PgConnection,
        pet_id: PetId,
        item_id: PetItemId,
        slot: EquipmentSlot,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO equipped_items (id, pet_id, item_id, slot)
              VALUES ($1, $2, $3, $4::equipment_slot)
              ON CONFLICT (pet_id, slot)
              DO UPDATE SET item_id = EXCLUDED.item_id",
        )
        .bind(EquippedItemId::new().into_inner())
        .bind(pet_id.into_inner())
        .bind(item_id.into_inner())
        .bind(equipment_slot_to_db(slot))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Clear a slot; a no-op when nothing is equipped there. Returns
    /// whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn unequip(
        conn: &mut PgConnection,
        pet_id: PetId,
        slot: EquipmentSlot,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query(r"DELETE FROM equipped_items WHERE pet_id = $1 AND slot = $2::equipment_slot")
                .bind(pet_id.into_inner())
                .bind(equipment_slot_to_db(slot))
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List everything equipped on a pet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_for_pet(
        conn: &mut PgConnection,
        pet_id: PetId,
    ) -> Result<Vec<EquippedItem>, StoreError> {
        let rows = sqlx::query_as::<_, EquippedRow>(
            r"SELECT id, pet_id, item_id, slot::TEXT as slot
                FROM equipped_items WHERE pet_id = $1",
        )
        .bind(pet_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(EquippedRow::into_domain).collect()
    }
}
