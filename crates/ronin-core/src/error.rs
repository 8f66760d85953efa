//! Error types for the data model and equipment rules.

use crate::item::ItemId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating a character or their equipment.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested item ID does not exist on this character.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// An item was found but is not of the expected kind.
    #[error("item {id} is not a {expected}")]
    WrongItemKind {
        /// The item that was looked up.
        id: ItemId,
        /// The kind the caller expected ("weapon", "armor", "ammo", ...).
        expected: &'static str,
    },

    /// Equipping the weapon would exceed the hand limit: either one
    /// two-handed weapon or up to two one-handed weapons, never a mix.
    #[error("weapon equip limit reached")]
    WeaponLimitReached,

    /// Another armor is already equipped; it must be unequipped first.
    #[error("another armor is already equipped")]
    ArmorAlreadyEquipped,

    /// An armor category was set above its maximum.
    #[error("armor category {category} exceeds maximum {max}")]
    CategoryExceedsMax {
        /// The rejected category.
        category: u8,
        /// The armor's maximum category.
        max: u8,
    },

    /// Adding the item would push the carried load past the hard ceiling.
    #[error("carrying load {load} would exceed the maximum of {max}")]
    MaxLoadExceeded {
        /// The load the character would end up carrying.
        load: i32,
        /// The hard ceiling (twice the overencumbrance threshold).
        max: i32,
    },

    /// A consumable has no uses and no quantity left.
    #[error("consumable is exhausted")]
    ConsumableExhausted,
}
