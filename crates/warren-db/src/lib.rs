//! `PostgreSQL` data layer for the Warren tracker.
//!
//! `PostgreSQL` is the sole store: users, tasks, logs, the pet, inventory,
//! social records, and the currency audit ledger all live here. Uses
//! [`sqlx`] with runtime query construction (not compile-time checked) to
//! avoid requiring a live database at build time. All queries are
//! parameterized.
//!
//! # Transaction discipline
//!
//! Every mutating store function takes a `&mut PgConnection` rather than a
//! pool, so the engine can open one transaction per operation and thread it
//! through every read and write it performs -- the all-or-nothing contract
//! lives in `warren-core`, not here. [`PostgresPool::begin`] hands out the
//! transaction.
//!
//! # Modules
//!
//! - [`postgres`] -- Pool configuration and connection management
//! - [`codec`] -- Closed-enum <-> database string conversions
//! - [`users`], [`habits`], [`dailies`], [`todos`], [`rewards`] -- Task
//!   entity stores
//! - [`pets`], [`items`] -- Pet, catalog, inventory, and equipment stores
//! - [`groups`], [`challenges`] -- Social stores
//! - [`entries`] -- Currency audit entry store
//! - [`error`] -- The [`StoreError`] type

pub mod challenges;
pub mod codec;
pub mod dailies;
pub mod entries;
pub mod error;
pub mod groups;
pub mod habits;
pub mod items;
pub mod pets;
pub mod postgres;
pub mod rewards;
pub mod todos;
pub mod users;

pub use challenges::ChallengeStore;
pub use dailies::DailyStore;
pub use entries::EntryStore;
pub use error::StoreError;
pub use groups::GroupStore;
pub use habits::HabitStore;
pub use items::{CatalogStore, EquipmentStore, InventoryStore};
pub use pets::PetStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use rewards::RewardStore;
pub use todos::TodoStore;
pub use users::UserStore;
