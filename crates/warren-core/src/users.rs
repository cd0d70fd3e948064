//! Account provisioning.
//!
//! Credential and session handling belong to the outer auth layer; the
//! engine only owns the game-state side of registration: the user row
//! with its starting balances and the pet, created together in one
//! transaction so no account ever exists half-provisioned.

use warren_db::{PetStore, UserStore};
use warren_types::{Pet, PetId, User, UserId};

use crate::engine::Engine;
use crate::error::EngineError;

/// Gold a new account starts with.
pub const STARTING_GOLD: i64 = 500;

/// Gems a new account starts with.
pub const STARTING_GEMS: i64 = 10;

/// Stat values a new pet starts with.
const NEW_PET_HUNGER: i32 = 80;
const NEW_PET_HAPPINESS: i32 = 80;
const NEW_PET_HEALTH: i32 = 100;
const NEW_PET_ENERGY: i32 = 100;

impl Engine {
    /// Provision a new account: user row, starting balances, and pet.
    ///
    /// # Errors
    ///
    /// Returns a Conflict when the username is taken.
    pub async fn provision_user(&self, username: &str) -> Result<User, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        if UserStore::username_taken(&mut tx, username).await? {
            return Err(EngineError::Conflict(format!(
                "Username \"{username}\" is already taken."
            )));
        }

        let user = User {
            id: UserId::new(),
            username: username.to_owned(),
            gold: STARTING_GOLD,
            gems: STARTING_GEMS,
            created_at: now,
        };
        UserStore::insert(&mut tx, &user).await?;

        let pet = Pet {
            id: PetId::new(),
            user_id: user.id,
            name: format!("{username}'s Pet"),
            hunger: NEW_PET_HUNGER,
            happiness: NEW_PET_HAPPINESS,
            health: NEW_PET_HEALTH,
            energy: NEW_PET_ENERGY,
            created_at: now,
        };
        PetStore::insert(&mut tx, &pet).await?;

        tx.commit().await?;
        tracing::info!(user = %user.id, username, "Provisioned account");
        Ok(user)
    }

    /// Fetch a user's profile (balances included).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the account does not exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, EngineError> {
        let mut tx = self.pool().begin().await?;
        let user = Self::require_user(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(user)
    }
}
