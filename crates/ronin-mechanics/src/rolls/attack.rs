//! Attack rolls.
//!
//! Melee attacks test vigor, ranged attacks test spirit, both against a
//! default difficulty of 12. A ranged weapon that fires ammunition must
//! have a non-empty stack selected before anything is drawn, and one
//! unit is spent before the d20 — a miss still costs the arrow. On a
//! hit the weapon's damage is rolled (twice on a critical) against the
//! enemy's armor protection.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::{Ability, Character, ItemId, WeaponKind};

use crate::check::{D20Test, Grade};
use crate::error::{MechError, MechResult};
use crate::rolls::{DamageExchange, roll_exchange};

/// Default difficulty rating for an attack.
pub const ATTACK_DR: i32 = 12;

/// What the table sees before committing to an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPrompt {
    /// The attacking weapon.
    pub weapon: ItemId,
    /// The weapon's display name.
    pub weapon_name: String,
    /// Ability the attack tests (vigor melee, spirit ranged).
    pub ability: Ability,
    /// The character's current value in that ability.
    pub ability_value: i32,
    /// Difficulty offered as the default.
    pub base_dr: i32,
    /// The weapon's damage expression, offered as the default.
    pub damage: String,
}

/// The table's choices for an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackInput {
    /// Situational modifier added to the roll.
    pub modifier: i32,
    /// Difficulty rating.
    pub dr: i32,
    /// Damage expression, normally the weapon's own.
    pub damage: String,
    /// The enemy's armor protection expression.
    pub enemy_armor: String,
}

impl AttackInput {
    /// Defaults taken from a prepared prompt, with no enemy armor.
    pub fn from_prompt(prompt: &AttackPrompt) -> Self {
        Self {
            modifier: 0,
            dr: prompt.base_dr,
            damage: prompt.damage.clone(),
            enemy_armor: "0".to_string(),
        }
    }
}

/// A resolved attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// The attacking weapon.
    pub weapon: ItemId,
    /// Ability the attack tested.
    pub ability: Ability,
    /// The d20 test.
    pub test: D20Test,
    /// Whether a unit of ammunition was spent.
    pub ammo_spent: bool,
    /// The damage phase, present on a hit.
    pub exchange: Option<DamageExchange>,
}

fn ammo_check(character: &Character, weapon_id: ItemId) -> MechResult<Option<ItemId>> {
    let weapon = character.item(weapon_id)?.as_weapon()?;
    if weapon.kind != WeaponKind::Ranged || !weapon.use_ammo {
        return Ok(None);
    }
    let ammo_id = weapon.ammo_id.ok_or(MechError::NoAmmoSelected)?;
    let ammo = character.item(ammo_id)?.as_ammo()?;
    if ammo.quantity == 0 {
        return Err(MechError::NoAmmoRemaining);
    }
    Ok(Some(ammo_id))
}

/// Survey the character and weapon before an attack.
///
/// Fails if the weapon is missing, or if a ranged ammunition-firing
/// weapon has no usable stack selected.
pub fn prepare(character: &Character, weapon_id: ItemId) -> MechResult<AttackPrompt> {
    ammo_check(character, weapon_id)?;
    let item = character.item(weapon_id)?;
    let weapon = item.as_weapon()?;
    let ability = match weapon.kind {
        WeaponKind::Melee => Ability::Vigor,
        WeaponKind::Ranged => Ability::Spirit,
    };
    Ok(AttackPrompt {
        weapon: weapon_id,
        weapon_name: item.name.clone(),
        ability,
        ability_value: character.ability(ability),
        base_dr: ATTACK_DR,
        damage: weapon.damage.clone(),
    })
}

/// Resolve an attack. Ammunition is spent before the d20 is drawn.
pub fn resolve(
    character: &mut Character,
    weapon_id: ItemId,
    input: &AttackInput,
    rng: &mut StdRng,
) -> MechResult<AttackOutcome> {
    let ammo_id = ammo_check(character, weapon_id)?;
    let ability = match character.item(weapon_id)?.as_weapon()?.kind {
        WeaponKind::Melee => Ability::Vigor,
        WeaponKind::Ranged => Ability::Spirit,
    };

    let ammo_spent = match ammo_id {
        Some(id) => {
            character.spend_ammo(id)?;
            true
        }
        None => false,
    };

    let test = D20Test::roll(character.ability(ability), input.modifier, input.dr, rng);
    let exchange = if test.grade.is_success() {
        let doubled = test.grade == Grade::Critical;
        Some(roll_exchange(
            &input.damage,
            &input.enemy_armor,
            doubled,
            rng,
        )?)
    } else {
        None
    };

    Ok(AttackOutcome {
        weapon: weapon_id,
        ability,
        test,
        ammo_spent,
        exchange,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use ronin_core::{Abilities, Ammo, Item, ItemKind, Weapon};

    use crate::check::Grade;

    fn samurai() -> Character {
        Character::new("Okatsu").with_abilities(Abilities::new(3, 2, 2, 1))
    }

    fn add_melee(character: &mut Character, damage: &str) -> ItemId {
        let item = Item::new("Katana", ItemKind::Weapon(Weapon::melee(damage)));
        character.add_item(item).unwrap()
    }

    #[test]
    fn melee_uses_vigor() {
        let mut character = samurai();
        let katana = add_melee(&mut character, "1d8");
        let prompt = prepare(&character, katana).unwrap();
        assert_eq!(prompt.ability, Ability::Vigor);
        assert_eq!(prompt.ability_value, 3);
        assert_eq!(prompt.base_dr, 12);
        assert_eq!(prompt.damage, "1d8");
    }

    #[test]
    fn ranged_uses_spirit_and_needs_ammo() {
        let mut character = samurai();
        let bow = character
            .add_item(Item::new(
                "Yumi",
                ItemKind::Weapon(Weapon::ranged("1d6").with_ammo(None)),
            ))
            .unwrap();
        assert!(matches!(
            prepare(&character, bow),
            Err(MechError::NoAmmoSelected)
        ));

        let arrows = character
            .add_item(Item::new("Arrows", ItemKind::Ammo(Ammo::new(3))))
            .unwrap();
        character.set_weapon_ammo(bow, Some(arrows)).unwrap();
        let prompt = prepare(&character, bow).unwrap();
        assert_eq!(prompt.ability, Ability::Spirit);
    }

    #[test]
    fn empty_stack_rejected_before_any_draw() {
        let mut character = samurai();
        let bow = character
            .add_item(Item::new("Yumi", ItemKind::Weapon(Weapon::ranged("1d6"))))
            .unwrap();
        let arrows = character
            .add_item(Item::new("Arrows", ItemKind::Ammo(Ammo::new(0))))
            .unwrap();
        character.set_weapon_ammo(bow, Some(arrows)).unwrap();
        let input = AttackInput {
            modifier: 0,
            dr: 12,
            damage: "1d6".to_string(),
            enemy_armor: "0".to_string(),
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            resolve(&mut character, bow, &input, &mut rng),
            Err(MechError::NoAmmoRemaining)
        ));
    }

    #[test]
    fn ammo_spent_exactly_once_even_on_miss() {
        let mut character = samurai();
        let bow = character
            .add_item(Item::new("Yumi", ItemKind::Weapon(Weapon::ranged("1d6"))))
            .unwrap();
        let arrows = character
            .add_item(Item::new("Arrows", ItemKind::Ammo(Ammo::new(5))))
            .unwrap();
        character.set_weapon_ammo(bow, Some(arrows)).unwrap();
        let input = AttackInput {
            modifier: 0,
            dr: 12,
            damage: "1d6".to_string(),
            enemy_armor: "0".to_string(),
        };
        let mut rng = StdRng::seed_from_u64(2);
        for expected in (0..5).rev() {
            let outcome = resolve(&mut character, bow, &input, &mut rng).unwrap();
            assert!(outcome.ammo_spent);
            let remaining = character.item(arrows).unwrap().as_ammo().unwrap().quantity;
            assert_eq!(remaining, expected);
        }
    }

    #[test]
    fn hit_rolls_damage_miss_does_not() {
        let mut character = samurai();
        let katana = add_melee(&mut character, "1d8");
        let input = AttackInput {
            modifier: 0,
            dr: 12,
            damage: "1d8".to_string(),
            enemy_armor: "1d2".to_string(),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut saw_hit = false;
        let mut saw_miss = false;
        for _ in 0..40 {
            let outcome = resolve(&mut character, katana, &input, &mut rng).unwrap();
            assert!(!outcome.ammo_spent);
            match outcome.exchange {
                Some(exchange) => {
                    saw_hit = true;
                    assert!(outcome.test.grade.is_success());
                    if outcome.test.grade == Grade::Critical {
                        assert!(exchange.critical_damage.is_some());
                    } else {
                        assert!(exchange.critical_damage.is_none());
                    }
                }
                None => {
                    saw_miss = true;
                    assert!(!outcome.test.grade.is_success());
                }
            }
        }
        assert!(saw_hit && saw_miss);
    }

    #[test]
    fn attacking_a_non_weapon_fails() {
        let mut character = samurai();
        let arrows = character
            .add_item(Item::new("Arrows", ItemKind::Ammo(Ammo::new(3))))
            .unwrap();
        assert!(prepare(&character, arrows).is_err());
    }
}
