//! Pet stat model, shop pricing, and equipment rules for the Warren tracker.
//!
//! Pure logic over the pet and item structs from `warren-types`:
//!
//! - [`stats`] -- clamped stat raises; no stat ever leaves [0, 100]
//! - [`items`] -- purchase charge selection and consumable-use planning
//! - [`equipment`] -- equip/unequip slot validation
//! - [`error`] -- error types for all pet operations ([`PetError`])
//!
//! Persistence and transaction composition live in `warren-core`.

pub mod equipment;
pub mod error;
pub mod items;
pub mod stats;

pub use error::PetError;
pub use items::{PurchaseCharge, UseItemPlan};
pub use stats::{raise_stat, stat_of, STAT_MAX, STAT_MIN};
