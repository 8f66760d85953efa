//! Defense rolls.
//!
//! Dodging tests swiftness against a default difficulty of 12, raised
//! by the equipped armor's defense penalty. A failed defense means the
//! enemy's damage comes through against the character's own armor; on a
//! fumble the damage dice are doubled and the armor loses a category.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::{Ability, Character};

use crate::check::{D20Test, Grade};
use crate::error::MechResult;
use crate::rolls::{DamageExchange, roll_exchange};

/// Default difficulty rating for a defense.
pub const DEFENSE_DR: i32 = 12;

/// What the table sees before committing to a defense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensePrompt {
    /// The character's swiftness value.
    pub swiftness_value: i32,
    /// Difficulty offered as the default, before the armor penalty.
    pub base_dr: i32,
    /// Protection expression of the equipped armor ("0" when bare).
    pub armor_protection: String,
    /// Defense penalty of the equipped armor.
    pub armor_defense_penalty: i32,
}

/// The table's choices for a defense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseInput {
    /// Situational modifier added to the roll.
    pub modifier: i32,
    /// Difficulty rating before the armor penalty.
    pub dr: i32,
    /// The incoming damage expression.
    pub enemy_damage: String,
}

/// A resolved defense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseOutcome {
    /// The d20 test, armor penalty folded into its difficulty.
    pub test: D20Test,
    /// Armor defense penalty that was added to the difficulty.
    pub armor_defense_penalty: i32,
    /// The damage taken, present when the defense failed.
    pub exchange: Option<DamageExchange>,
    /// Whether the fumble degraded the equipped armor.
    pub armor_degraded: bool,
}

/// Survey the character before a defense.
pub fn prepare(character: &Character) -> DefensePrompt {
    let (protection, penalty) = match character.equipped_armor() {
        Some((_, armor)) => (armor.protection().to_string(), armor.defense_penalty),
        None => ("0".to_string(), 0),
    };
    DefensePrompt {
        swiftness_value: character.ability(Ability::Swiftness),
        base_dr: DEFENSE_DR,
        armor_protection: protection,
        armor_defense_penalty: penalty,
    }
}

/// Resolve a defense against incoming damage.
pub fn resolve(
    character: &mut Character,
    input: &DefenseInput,
    rng: &mut StdRng,
) -> MechResult<DefenseOutcome> {
    let prompt = prepare(character);
    let dr = input.dr + prompt.armor_defense_penalty;
    let test = D20Test::roll(prompt.swiftness_value, input.modifier, dr, rng);

    let mut exchange = None;
    let mut armor_degraded = false;
    if !test.grade.is_success() {
        let doubled = test.grade == Grade::Fumble;
        exchange = Some(roll_exchange(
            &input.enemy_damage,
            &prompt.armor_protection,
            doubled,
            rng,
        )?);
        if doubled {
            if let Some(armor) = character.equipped_armor_mut() {
                armor_degraded = armor.degrade();
            }
        }
    }

    Ok(DefenseOutcome {
        test,
        armor_defense_penalty: prompt.armor_defense_penalty,
        exchange,
        armor_degraded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use ronin_core::{Abilities, Armor, Item, ItemKind};

    fn armored() -> Character {
        let mut character =
            Character::new("Okatsu").with_abilities(Abilities::new(2, 3, 1, 2));
        let armor = Item::new("Do-maru", ItemKind::Armor(Armor::new(2).with_penalties(1, 2)));
        let id = armor.id;
        character.add_item(armor).unwrap();
        character.equip_armor(id).unwrap();
        character
    }

    #[test]
    fn prompt_reads_equipped_armor() {
        let prompt = prepare(&armored());
        assert_eq!(prompt.armor_protection, "1d4");
        assert_eq!(prompt.armor_defense_penalty, 2);
        assert_eq!(prompt.base_dr, 12);
    }

    #[test]
    fn bare_character_defaults() {
        let prompt = prepare(&Character::new("Ronin"));
        assert_eq!(prompt.armor_protection, "0");
        assert_eq!(prompt.armor_defense_penalty, 0);
    }

    #[test]
    fn penalty_raises_difficulty() {
        let mut character = armored();
        let input = DefenseInput {
            modifier: 0,
            dr: 12,
            enemy_damage: "1d6".to_string(),
        };
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = resolve(&mut character, &input, &mut rng).unwrap();
        assert_eq!(outcome.test.dr, 14);
    }

    #[test]
    fn failure_takes_damage_success_does_not() {
        let mut character = armored();
        let input = DefenseInput {
            modifier: 0,
            dr: 12,
            enemy_damage: "1d6".to_string(),
        };
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..40 {
            let outcome = resolve(&mut character, &input, &mut rng).unwrap();
            assert_eq!(outcome.exchange.is_some(), !outcome.test.grade.is_success());
        }
    }

    #[test]
    fn fumble_doubles_dice_and_degrades_armor() {
        let mut character = armored();
        let input = DefenseInput {
            modifier: -30,
            dr: 12,
            enemy_damage: "1d6".to_string(),
        };
        let mut rng = StdRng::seed_from_u64(0);
        loop {
            let before = character.equipped_armor().unwrap().1.current_category;
            let outcome = resolve(&mut character, &input, &mut rng).unwrap();
            if outcome.test.grade == Grade::Fumble {
                let exchange = outcome.exchange.unwrap();
                assert!(exchange.critical_damage.is_some());
                if before > 0 {
                    assert!(outcome.armor_degraded);
                    let after = character.equipped_armor().unwrap().1.current_category;
                    assert_eq!(after, before - 1);
                }
                break;
            }
        }
    }
}
