//! Parry rolls.
//!
//! Parrying tests resilience against a default difficulty of 12, with a
//! flat +2 for the maneuver plus the equipped armor's defense penalty.
//! Success turns into a riposte with the parrying weapon; failure means
//! suffering the enemy's blow through the character's own armor, and a
//! fumble doubles it and degrades the armor. Exactly one of the two
//! damage phases happens per roll.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::{Ability, Character, ItemId};

use crate::check::{D20Test, Grade};
use crate::error::MechResult;
use crate::rolls::{DamageExchange, roll_exchange};

/// Default difficulty rating for a parry, before the maneuver penalty.
pub const PARRY_DR: i32 = 12;
/// Flat penalty for attempting a parry at all.
pub const PARRY_PENALTY: i32 = 2;
/// Riposte damage when no parrying weapon can be determined.
pub const DEFAULT_PARRY_DAMAGE: &str = "d6";

/// What the table sees before committing to a parry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParryPrompt {
    /// The character's resilience value.
    pub resilience_value: i32,
    /// Difficulty offered as the default, before any penalty.
    pub base_dr: i32,
    /// Flat penalty for the maneuver.
    pub parry_penalty: i32,
    /// Defense penalty of the equipped armor.
    pub armor_defense_penalty: i32,
    /// Equipped weapons the riposte can use, by id and name.
    pub equipped_weapons: Vec<(ItemId, String)>,
    /// The weapon auto-selection would pick, when unambiguous.
    pub default_weapon: Option<ItemId>,
    /// The riposte damage expression auto-selection would use.
    pub default_damage: String,
}

/// The table's choices for a parry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParryInput {
    /// Situational modifier added to the roll.
    pub modifier: i32,
    /// Difficulty rating before the parry and armor penalties.
    pub dr: i32,
    /// Weapon used to riposte. When absent, the single equipped weapon
    /// is used, or a bare `d6` if none or several are equipped.
    pub weapon: Option<ItemId>,
    /// The incoming damage expression.
    pub enemy_damage: String,
    /// The enemy's armor protection expression, for the riposte.
    pub enemy_armor: String,
}

impl ParryInput {
    /// A parry at default difficulty with auto-selected weapon.
    pub fn new(enemy_damage: impl Into<String>, enemy_armor: impl Into<String>) -> Self {
        Self {
            modifier: 0,
            dr: PARRY_DR,
            weapon: None,
            enemy_damage: enemy_damage.into(),
            enemy_armor: enemy_armor.into(),
        }
    }
}

/// A resolved parry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParryOutcome {
    /// The d20 test, parry and armor penalties folded into its difficulty.
    pub test: D20Test,
    /// The weapon the riposte used, when one could be determined.
    pub weapon: Option<ItemId>,
    /// Riposte damage, present on a success.
    pub riposte: Option<DamageExchange>,
    /// Damage suffered, present on a failure.
    pub suffered: Option<DamageExchange>,
    /// Whether the fumble degraded the equipped armor.
    pub armor_degraded: bool,
}

fn riposte_weapon(character: &Character, chosen: Option<ItemId>) -> (Option<ItemId>, String) {
    if let Some(id) = chosen {
        if let Ok(weapon) = character.item(id).and_then(|item| item.as_weapon()) {
            return (Some(id), weapon.damage.clone());
        }
    }
    let equipped = character.equipped_weapons();
    match equipped.as_slice() {
        [(id, weapon)] => (Some(*id), weapon.damage.clone()),
        _ => (None, DEFAULT_PARRY_DAMAGE.to_string()),
    }
}

/// Survey the character before a parry.
pub fn prepare(character: &Character) -> ParryPrompt {
    let equipped_weapons = character
        .equipped_weapons()
        .into_iter()
        .map(|(id, _)| {
            let name = character
                .item(id)
                .map_or_else(|_| String::new(), |item| item.name.clone());
            (id, name)
        })
        .collect();
    let (default_weapon, default_damage) = riposte_weapon(character, None);
    ParryPrompt {
        resilience_value: character.ability(Ability::Resilience),
        base_dr: PARRY_DR,
        parry_penalty: PARRY_PENALTY,
        armor_defense_penalty: character
            .equipped_armor()
            .map_or(0, |(_, a)| a.defense_penalty),
        equipped_weapons,
        default_weapon,
        default_damage,
    }
}

/// Resolve a parry against incoming damage.
pub fn resolve(
    character: &mut Character,
    input: &ParryInput,
    rng: &mut StdRng,
) -> MechResult<ParryOutcome> {
    let prompt = prepare(character);
    let own_protection = character
        .equipped_armor()
        .map_or("0".to_string(), |(_, a)| a.protection().to_string());
    let (weapon, riposte_damage) = riposte_weapon(character, input.weapon);

    let dr = input.dr + PARRY_PENALTY + prompt.armor_defense_penalty;
    let test = D20Test::roll(
        character.ability(Ability::Resilience),
        input.modifier,
        dr,
        rng,
    );

    let mut riposte = None;
    let mut suffered = None;
    let mut armor_degraded = false;
    if test.grade.is_success() {
        let doubled = test.grade == Grade::Critical;
        riposte = Some(roll_exchange(
            &riposte_damage,
            &input.enemy_armor,
            doubled,
            rng,
        )?);
    } else {
        let doubled = test.grade == Grade::Fumble;
        suffered = Some(roll_exchange(
            &input.enemy_damage,
            &own_protection,
            doubled,
            rng,
        )?);
        if doubled {
            if let Some(armor) = character.equipped_armor_mut() {
                armor_degraded = armor.degrade();
            }
        }
    }

    Ok(ParryOutcome {
        test,
        weapon,
        riposte,
        suffered,
        armor_degraded,
    })
}
