//! Persistence for pets.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{Pet, PetId, UserId};

use crate::error::StoreError;

/// Operations on the `pets` table.
pub struct PetStore;

/// A row from the `pets` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct PetRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    hunger: i32,
    happiness: i32,
    health: i32,
    energy: i32,
    created_at: DateTime<Utc>,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Self {
            id: PetId::from(row.id),
            user_id: UserId::from(row.user_id),
            name: row.name,
            hunger: row.hunger,
            happiness: row.happiness,
            health: row.health,
            energy: row.energy,
            created_at: row.created_at,
        }
    }
}

const SELECT_PET: &str =
    r"SELECT id, user_id, name, hunger, happiness, health, energy, created_at FROM pets";

impl PetStore {
    /// Insert a new pet row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails (including the
    /// one-pet-per-user unique constraint).
    pub async fn insert(conn: &mut PgConnection, pet: &Pet) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO pets (id, user_id, name, hunger, happiness, health, energy, created_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(pet.id.into_inner())
        .bind(pet.user_id.into_inner())
        .bind(&pet.name)
        .bind(pet.hunger)
        .bind(pet.happiness)
        .bind(pet.health)
        .bind(pet.energy)
        .bind(pet.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch the pet belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn fetch_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Option<Pet>, StoreError> {
        let row = sqlx::query_as::<_, PetRow>(&format!("{SELECT_PET} WHERE user_id = $1"))
            .bind(user_id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(Pet::from))
    }

    /// Write back all four stats after a clamped mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails (the schema's
    /// range CHECKs backstop the clamp).
    pub async fn update_stats(conn: &mut PgConnection, pet: &Pet) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE pets SET hunger = $2, happiness = $3, health = $4, energy = $5
               WHERE id = $1",
        )
        .bind(pet.id.into_inner())
        .bind(pet.hunger)
        .bind(pet.happiness)
        .bind(pet.health)
        .bind(pet.energy)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Rename a pet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn rename(
        conn: &mut PgConnection,
        id: PetId,
        name: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE pets SET name = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
