//! The broken table, consulted when a character drops to zero hit
//! points.
//!
//! A d4 picks the fate: unconsciousness, a maiming wound, a slow
//! hemorrhage, or death. Unconsciousness (and the worst maiming) sets
//! the character's hit points to the waking roll; hemorrhage leaves
//! them where they are until the table adjudicates; death zeroes them.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::Character;

/// The worsening roll inside a maiming wound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incapacity {
    /// Rounds spent out of the fight.
    pub rounds: u32,
    /// Hit points the character wakes with.
    pub recovered_hp: u32,
}

/// What the broken table dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fate", rename_all = "snake_case")]
pub enum BrokenFate {
    /// Knocked out cold, waking later with a few hit points.
    Unconscious {
        /// Rounds spent unconscious.
        rounds: u32,
        /// Hit points on waking.
        waking_hp: u32,
    },
    /// A lasting wound; severity 6 also knocks the character out.
    Maimed {
        /// The d6 severity roll.
        severity: u32,
        /// Present only at severity 6.
        incapacity: Option<Incapacity>,
    },
    /// Bleeding out over hours unless treated.
    Hemorrhage {
        /// Hours until the bleeding kills.
        hours: u32,
    },
    /// Dead on the spot.
    Dead,
}

/// A resolved consultation of the broken table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenOutcome {
    /// The initial d4 pick.
    pub primary: u32,
    /// What it came to.
    pub fate: BrokenFate,
    /// The hit point value the character was set to, when any.
    pub hp_set: Option<i32>,
}

/// Consult the broken table, applying hit point changes as it dictates.
pub fn resolve(character: &mut Character, rng: &mut StdRng) -> BrokenOutcome {
    let primary = rng.random_range(1..=4u32);
    let (fate, hp_set) = match primary {
        1 => {
            let rounds = rng.random_range(1..=4u32);
            let waking_hp = rng.random_range(1..=4u32);
            (
                BrokenFate::Unconscious { rounds, waking_hp },
                Some(waking_hp as i32),
            )
        }
        2 => {
            let severity = rng.random_range(1..=6u32);
            if severity == 6 {
                let rounds = rng.random_range(1..=4u32);
                let recovered_hp = rng.random_range(1..=4u32);
                (
                    BrokenFate::Maimed {
                        severity,
                        incapacity: Some(Incapacity {
                            rounds,
                            recovered_hp,
                        }),
                    },
                    Some(recovered_hp as i32),
                )
            } else {
                (
                    BrokenFate::Maimed {
                        severity,
                        incapacity: None,
                    },
                    None,
                )
            }
        }
        3 => {
            let hours = rng.random_range(1..=2u32);
            (BrokenFate::Hemorrhage { hours }, None)
        }
        _ => (BrokenFate::Dead, Some(0)),
    };

    if let Some(hp) = hp_set {
        character.hp.set(hp);
    }

    BrokenOutcome {
        primary,
        fate,
        hp_set,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn every_fate_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..200 {
            let mut character = Character::new("Ronin");
            character.hp.set(0);
            let outcome = resolve(&mut character, &mut rng);
            assert!((1..=4).contains(&outcome.primary));
            match outcome.fate {
                BrokenFate::Unconscious { rounds, waking_hp } => {
                    assert!((1..=4).contains(&rounds));
                    assert!((1..=4).contains(&waking_hp));
                    assert_eq!(character.hp.value, waking_hp as i32);
                }
                BrokenFate::Maimed {
                    severity,
                    incapacity,
                } => {
                    assert!((1..=6).contains(&severity));
                    assert_eq!(incapacity.is_some(), severity == 6);
                    if let Some(inc) = incapacity {
                        assert_eq!(character.hp.value, inc.recovered_hp as i32);
                    } else {
                        assert_eq!(character.hp.value, 0);
                    }
                }
                BrokenFate::Hemorrhage { hours } => {
                    assert!((1..=2).contains(&hours));
                    assert_eq!(character.hp.value, 0);
                }
                BrokenFate::Dead => {
                    assert_eq!(character.hp.value, 0);
                    assert_eq!(outcome.hp_set, Some(0));
                }
            }
        }
    }

    #[test]
    fn hemorrhage_leaves_hp_untouched() {
        let mut rng = StdRng::seed_from_u64(0);
        loop {
            let mut character = Character::new("Ronin");
            character.hp.set(3);
            let outcome = resolve(&mut character, &mut rng);
            if matches!(outcome.fate, BrokenFate::Hemorrhage { .. }) {
                assert_eq!(character.hp.value, 3);
                assert_eq!(outcome.hp_set, None);
                break;
            }
        }
    }
}
