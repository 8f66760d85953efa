//! Equipment rules: carrying load, encumbrance, and equip constraints.
//!
//! All functions here are deterministic reads over a [`Character`]; the
//! caller persists any result. Equip validation rejects and leaves state
//! untouched — nothing is ever implicitly unequipped for the user.

use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::item::{Hand, Item, ItemId, ItemKind};

/// Sum the carried load over all owned items, skipping equipped armor.
/// Stackable kinds multiply their per-unit load by quantity.
pub fn carrying_load(character: &Character) -> i32 {
    character
        .items()
        .iter()
        .filter(|item| !matches!(&item.kind, ItemKind::Armor(a) if a.equipped))
        .map(Item::load)
        .sum()
}

/// The soft overencumbrance threshold: vigor + 8.
pub fn encumbrance_limit(character: &Character) -> i32 {
    character.abilities.vigor + 8
}

/// The hard ceiling on carried load: twice the soft threshold. Item
/// additions past this point are refused outright.
pub fn hard_load_ceiling(character: &Character) -> i32 {
    encumbrance_limit(character) * 2
}

/// Returns true when the carried load has reached the soft threshold.
/// Overencumbered characters take +2 DR on vigor and swiftness checks.
pub fn is_overencumbered(character: &Character) -> bool {
    character.carrying_capacity() >= encumbrance_limit(character)
}

/// Admission gate for adding an item: the candidate contributes its
/// marginal (per-unit) load, and the result must stay at or under the
/// hard ceiling.
pub fn admit_item(character: &Character, candidate: &Item) -> CoreResult<()> {
    let load = character.carrying_capacity() + candidate.marginal_load();
    let max = hard_load_ceiling(character);
    if load > max {
        return Err(CoreError::MaxLoadExceeded { load, max });
    }
    Ok(())
}

/// Validate equipping a weapon against the hand limit, with the candidate
/// excluded from the currently-equipped set:
/// - a two-handed weapon requires empty hands;
/// - a one-handed weapon is refused if a two-handed weapon is equipped or
///   two one-handed weapons already are.
pub fn validate_weapon_equip(character: &Character, candidate: ItemId) -> CoreResult<()> {
    let weapon = character.item(candidate)?.as_weapon()?;

    let others: Vec<_> = character
        .equipped_weapons()
        .into_iter()
        .filter(|(id, _)| *id != candidate)
        .collect();
    let one_handed = others.iter().filter(|(_, w)| w.hand == Hand::One).count();
    let two_handed = others.iter().filter(|(_, w)| w.hand == Hand::Two).count();

    let limit_reached = match weapon.hand {
        Hand::Two => one_handed > 0 || two_handed > 0,
        Hand::One => two_handed > 0 || one_handed >= 2,
    };
    if limit_reached {
        return Err(CoreError::WeaponLimitReached);
    }
    Ok(())
}

/// Validate equipping armor: refused while any other armor is equipped.
/// The wearer must unequip the current armor first — there is no
/// automatic swap.
pub fn validate_armor_equip(character: &Character, candidate: ItemId) -> CoreResult<()> {
    character.item(candidate)?.as_armor()?;
    let conflict = character
        .equipped_armor()
        .is_some_and(|(id, _)| id != candidate);
    if conflict {
        return Err(CoreError::ArmorAlreadyEquipped);
    }
    Ok(())
}
