//! Plain ability checks.
//!
//! The default difficulty is 10. Checks against vigor or swiftness pick
//! up a +2 penalty while overencumbered, and swiftness checks also add
//! the equipped armor's swiftness penalty. Both penalties are applied on
//! top of whatever difficulty the table entered.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::{Ability, Character, equipment};

use crate::check::D20Test;

/// Default difficulty rating for an ability check.
pub const ABILITY_CHECK_DR: i32 = 10;
/// Penalty added to vigor and swiftness checks while overencumbered.
pub const OVERENCUMBRANCE_PENALTY: i32 = 2;

/// What the table sees before committing to an ability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCheckPrompt {
    /// The ability being tested.
    pub ability: Ability,
    /// The character's current value in that ability.
    pub ability_value: i32,
    /// Difficulty offered as the default.
    pub base_dr: i32,
    /// Whether the overencumbrance penalty will apply.
    pub overencumbered: bool,
    /// Armor swiftness penalty that will apply (swiftness checks only).
    pub armor_swiftness_penalty: i32,
}

/// The table's choices for an ability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCheckInput {
    /// Situational modifier added to the roll.
    pub modifier: i32,
    /// Difficulty rating before penalties.
    pub dr: i32,
}

impl Default for AbilityCheckInput {
    fn default() -> Self {
        Self {
            modifier: 0,
            dr: ABILITY_CHECK_DR,
        }
    }
}

/// A resolved ability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCheckOutcome {
    /// The ability that was tested.
    pub ability: Ability,
    /// The d20 test, with penalties folded into its difficulty.
    pub test: D20Test,
    /// Overencumbrance penalty that was added to the difficulty.
    pub overencumbrance_penalty: i32,
    /// Armor swiftness penalty that was added to the difficulty.
    pub armor_swiftness_penalty: i32,
}

/// Survey the character before an ability check.
pub fn prepare(character: &Character, ability: Ability) -> AbilityCheckPrompt {
    let overencumbered = equipment::is_overencumbered(character);
    // Only a positive penalty raises the difficulty; armor never helps.
    let armor_swiftness_penalty = match ability {
        Ability::Swiftness => character
            .equipped_armor()
            .map_or(0, |(_, armor)| armor.swiftness_penalty.max(0)),
        _ => 0,
    };
    AbilityCheckPrompt {
        ability,
        ability_value: character.ability(ability),
        base_dr: ABILITY_CHECK_DR,
        overencumbered,
        armor_swiftness_penalty,
    }
}

/// Resolve an ability check.
pub fn resolve(
    character: &Character,
    ability: Ability,
    input: AbilityCheckInput,
    rng: &mut StdRng,
) -> AbilityCheckOutcome {
    let prompt = prepare(character, ability);
    let overencumbrance_penalty = match ability {
        Ability::Vigor | Ability::Swiftness if prompt.overencumbered => OVERENCUMBRANCE_PENALTY,
        _ => 0,
    };
    let dr = input.dr + overencumbrance_penalty + prompt.armor_swiftness_penalty;
    let test = D20Test::roll(prompt.ability_value, input.modifier, dr, rng);
    AbilityCheckOutcome {
        ability,
        test,
        overencumbrance_penalty,
        armor_swiftness_penalty: prompt.armor_swiftness_penalty,
    }
}
