//! Error types for the pet crate.

use warren_types::PetItemKind;

/// Errors that can occur during pet item and equipment operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetError {
    /// The item has no stat effect and cannot be consumed.
    #[error("item of kind {kind:?} has no stat effect and cannot be used on the pet")]
    NotConsumable {
        /// The item's catalog kind.
        kind: PetItemKind,
    },

    /// The item has no equipment slot and cannot be equipped.
    #[error("item of kind {kind:?} has no equipment slot and cannot be equipped")]
    NotEquippable {
        /// The item's catalog kind.
        kind: PetItemKind,
    },

    /// An owned-item quantity was not at least 1.
    #[error("inventory row has invalid quantity {quantity}")]
    InvalidQuantity {
        /// The offending quantity.
        quantity: i32,
    },
}
