//! The seven roll resolvers.
//!
//! Each resolver follows the same protocol: a `prepare` step reads the
//! character and surfaces everything the table needs to see before
//! committing (default difficulty, penalties, weapon damage), an input
//! struct carries the table's choices, and a `resolve` step draws dice
//! and produces an outcome value. Resolvers never touch the character
//! beyond what their rules demand.

pub mod ability;
pub mod advancement;
pub mod attack;
pub mod broken;
pub mod defense;
pub mod parry;
pub mod seppuku;

pub use ability::{AbilityCheckInput, AbilityCheckOutcome, AbilityCheckPrompt};
pub use advancement::{AbilityAdvance, AdvancementOutcome, HpTrial};
pub use attack::{AttackInput, AttackOutcome, AttackPrompt};
pub use broken::{BrokenFate, BrokenOutcome, Incapacity};
pub use defense::{DefenseInput, DefenseOutcome, DefensePrompt};
pub use parry::{ParryInput, ParryOutcome, ParryPrompt};
pub use seppuku::{SeppukuOutcome, SeppukuProgress, SeppukuRite, SeppukuStage};

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpr, RollResult};
use crate::error::MechResult;

/// One side dealing damage through the other side's armor.
///
/// On a critical hit the damage expression is rolled a second time and
/// both totals are summed. The armor roll is subtracted last and the
/// final figure never goes below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageExchange {
    /// The damage roll.
    pub damage: RollResult,
    /// The extra damage roll on a critical hit.
    pub critical_damage: Option<RollResult>,
    /// The defender's armor protection roll.
    pub armor: RollResult,
    /// Damage before armor.
    pub total_damage: i32,
    /// Damage after armor, floored at zero.
    pub final_damage: i32,
}

pub(crate) fn roll_exchange(
    damage_expr: &str,
    armor_expr: &str,
    doubled: bool,
    rng: &mut StdRng,
) -> MechResult<DamageExchange> {
    let damage_dice = DiceExpr::parse(damage_expr)?;
    let armor_dice = DiceExpr::parse(armor_expr)?;
    let damage = damage_dice.roll(rng);
    let critical_damage = doubled.then(|| damage_dice.roll(rng));
    let armor = armor_dice.roll(rng);
    let total_damage =
        damage.total() + critical_damage.as_ref().map_or(0, RollResult::total);
    let final_damage = (total_damage - armor.total()).max(0);
    Ok(DamageExchange {
        damage,
        critical_damage,
        armor,
        total_damage,
        final_damage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn exchange_floors_at_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..30 {
            let exchange = roll_exchange("1d2", "1d6", false, &mut rng).unwrap();
            assert!(exchange.final_damage >= 0);
            assert_eq!(
                exchange.final_damage,
                (exchange.total_damage - exchange.armor.total()).max(0)
            );
        }
    }

    #[test]
    fn doubled_rolls_twice() {
        let mut rng = StdRng::seed_from_u64(3);
        let exchange = roll_exchange("1d6", "0", true, &mut rng).unwrap();
        let extra = exchange.critical_damage.as_ref().unwrap();
        assert_eq!(
            exchange.total_damage,
            exchange.damage.total() + extra.total()
        );
    }

    #[test]
    fn no_armor_passes_damage_through() {
        let mut rng = StdRng::seed_from_u64(3);
        let exchange = roll_exchange("1d6+1", "0", false, &mut rng).unwrap();
        assert_eq!(exchange.final_damage, exchange.total_damage);
    }
}
