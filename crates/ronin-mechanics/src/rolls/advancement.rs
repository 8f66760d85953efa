//! Advancement rolls, made at the end of a chapter.
//!
//! Hit points first: 6d10 against the current maximum, and meeting it
//! raises the maximum by 1d6. Then each ability rolls a d6 against its
//! own value — rolling at or above the value earns +1, falling short
//! costs 1. An ability at 1 or below instead only worsens on a natural
//! 1. Values never leave the -3..=6 band; a roll that would push past
//! either end changes nothing.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::{Ability, Character};

use crate::dice::{DiceExpr, RollResult};

/// Lowest an ability can advance (or regress) to.
pub const ABILITY_MIN: i32 = -3;
/// Highest an ability can advance to.
pub const ABILITY_MAX: i32 = 6;

/// The hit point half of an advancement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpTrial {
    /// The 6d10 roll.
    pub roll: RollResult,
    /// The maximum hit points the roll had to meet.
    pub threshold: i32,
    /// The 1d6 increase, rolled only when the threshold was met.
    pub increase: Option<RollResult>,
}

/// One ability's advancement roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityAdvance {
    /// The ability rolled for.
    pub ability: Ability,
    /// The d6 roll.
    pub roll: RollResult,
    /// Value before the roll.
    pub old_value: i32,
    /// Applied change: -1, 0, or +1.
    pub change: i32,
    /// Value after the roll.
    pub new_value: i32,
}

/// A resolved advancement, already applied to the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementOutcome {
    /// The hit point trial.
    pub hp: HpTrial,
    /// One entry per ability, in fixed order.
    pub abilities: Vec<AbilityAdvance>,
}

const HP_TRIAL: DiceExpr = DiceExpr {
    count: 6,
    sides: 10,
    modifier: 0,
};
const D6: DiceExpr = DiceExpr {
    count: 1,
    sides: 6,
    modifier: 0,
};

fn ability_change(value: i32, roll: i32) -> i32 {
    let raw = if value <= 1 {
        if roll == 1 { -1 } else { 1 }
    } else if roll >= value {
        1
    } else {
        -1
    };
    let clamped = (value + raw).clamp(ABILITY_MIN, ABILITY_MAX);
    clamped - value
}

/// Roll a full advancement and apply it to the character.
pub fn resolve(character: &mut Character, rng: &mut StdRng) -> AdvancementOutcome {
    let threshold = character.hp.max;
    let roll = HP_TRIAL.roll(rng);
    let increase = (roll.total() >= threshold).then(|| D6.roll(rng));
    if let Some(inc) = &increase {
        character.hp.raise_max(inc.total());
    }
    let hp = HpTrial {
        roll,
        threshold,
        increase,
    };

    let abilities = Ability::ALL
        .into_iter()
        .map(|ability| {
            let old_value = character.ability(ability);
            let roll = D6.roll(rng);
            let change = ability_change(old_value, roll.total());
            let new_value = old_value + change;
            character.abilities.set(ability, new_value);
            AbilityAdvance {
                ability,
                roll,
                old_value,
                change,
                new_value,
            }
        })
        .collect();

    AdvancementOutcome { hp, abilities }
}
