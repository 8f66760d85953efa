//! Character and equipment data model for the RONIN rules engine.
//!
//! This crate owns the persistent shape of a character: ability scores,
//! hit points and honor, the polymorphic item collection, and the pure
//! equipment rules (carrying capacity, equip constraints). It contains no
//! randomness — dice and roll resolution live in `ronin-mechanics`.

/// Ability keys and score storage.
pub mod ability;
/// The character data holder.
pub mod character;
/// Equipment rules: carrying load, encumbrance, equip constraints.
pub mod equipment;
/// Error types used throughout the crate.
pub mod error;
/// Item variants, identifiers, and weight classes.
pub mod item;
/// Clamped numeric resources (hit points, honor).
pub mod resource;

/// Re-export ability types.
pub use ability::{Abilities, Ability};
/// Re-export the character holder.
pub use character::Character;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{
    Ammo, Armor, Consumable, Gear, Hand, Item, ItemId, ItemKind, Uses, Weapon, WeaponKind,
    WeightClass,
};
/// Re-export the resource type.
pub use resource::Resource;
