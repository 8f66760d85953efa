//! The seppuku rite, a multi-stage resolution.
//!
//! The rite walks fixed stages: a confirmation, the choice of a
//! kaishakunin (assistant), a spirit test (DR 12) to steady the hand,
//! and a resilience test (DR 14) for the second cut. Failing the spirit
//! test ends the rite in disgrace. Passing the second cut restores
//! honor (2d6+2); failing it with an assistant restores a little
//! (1d6+1); failing it alone leaves the character bleeding (1d8,
//! reported for the table to apply).

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::{Ability, Character};

use crate::check::D20Test;
use crate::dice::{DiceExpr, RollResult};
use crate::error::{MechError, MechResult};

/// Difficulty of the spirit test to begin the cut.
pub const SEPPUKU_SPIRIT_DR: i32 = 12;
/// Difficulty of the resilience test for the second cut.
pub const SEPPUKU_RESILIENCE_DR: i32 = 14;

/// Where a rite currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeppukuStage {
    /// Waiting for the character to commit to the rite.
    Confirm,
    /// Waiting for the kaishakunin decision.
    AskAssistant,
    /// Spirit held; waiting for the second cut.
    AwaitSecondCut,
    /// The rite has ended, one way or another.
    Done,
}

/// The final record of a rite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeppukuOutcome {
    /// Whether a kaishakunin stood by.
    pub assisted: bool,
    /// The spirit test.
    pub spirit: D20Test,
    /// The resilience test, absent when the spirit failed.
    pub resilience: Option<D20Test>,
    /// The honor restoration roll, when one was earned.
    pub honor_roll: Option<RollResult>,
    /// Honor after restoration was applied.
    pub honor_after: Option<i32>,
    /// Bleeding damage, reported when the cut failed unassisted.
    pub damage: Option<RollResult>,
}

/// What a step of the rite produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeppukuProgress {
    /// The character turned back at the confirmation.
    Aborted,
    /// Confirmed; the kaishakunin decision is next.
    AwaitingAssistantChoice,
    /// The spirit test failed and the rite ended.
    SpiritFailed(SeppukuOutcome),
    /// The spirit held; the second cut is next.
    AwaitingSecondCut {
        /// The passed spirit test.
        spirit: D20Test,
    },
    /// The second cut was made and the rite ended.
    Complete(SeppukuOutcome),
}

/// A seppuku rite in progress. Stages must be stepped in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeppukuRite {
    stage: SeppukuStage,
    assisted: bool,
    spirit: Option<D20Test>,
}

impl Default for SeppukuRite {
    fn default() -> Self {
        Self::new()
    }
}

impl SeppukuRite {
    /// Begin a rite at the confirmation stage.
    pub fn new() -> Self {
        Self {
            stage: SeppukuStage::Confirm,
            assisted: false,
            spirit: None,
        }
    }

    /// The current stage.
    pub fn stage(&self) -> SeppukuStage {
        self.stage
    }

    fn expect(&self, stage: SeppukuStage, name: &'static str) -> MechResult<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(MechError::WrongSeppukuStage { expected: name })
        }
    }

    /// Commit to the rite, or turn back.
    pub fn confirm(&mut self, proceed: bool) -> MechResult<SeppukuProgress> {
        self.expect(SeppukuStage::Confirm, "confirm")?;
        if !proceed {
            self.stage = SeppukuStage::Done;
            return Ok(SeppukuProgress::Aborted);
        }
        self.stage = SeppukuStage::AskAssistant;
        Ok(SeppukuProgress::AwaitingAssistantChoice)
    }

    /// Settle the kaishakunin question and make the spirit test.
    pub fn choose_assistant(
        &mut self,
        assisted: bool,
        character: &Character,
        rng: &mut StdRng,
    ) -> MechResult<SeppukuProgress> {
        self.expect(SeppukuStage::AskAssistant, "assistant choice")?;
        self.assisted = assisted;

        let spirit = D20Test::roll(
            character.ability(Ability::Spirit),
            0,
            SEPPUKU_SPIRIT_DR,
            rng,
        );
        if !spirit.grade.is_success() {
            self.stage = SeppukuStage::Done;
            return Ok(SeppukuProgress::SpiritFailed(SeppukuOutcome {
                assisted,
                spirit,
                resilience: None,
                honor_roll: None,
                honor_after: None,
                damage: None,
            }));
        }

        self.spirit = Some(spirit);
        self.stage = SeppukuStage::AwaitSecondCut;
        Ok(SeppukuProgress::AwaitingSecondCut { spirit })
    }

    /// Make the second cut and settle honor.
    pub fn second_cut(
        &mut self,
        character: &mut Character,
        rng: &mut StdRng,
    ) -> MechResult<SeppukuProgress> {
        self.expect(SeppukuStage::AwaitSecondCut, "second cut")?;
        let spirit = self
            .spirit
            .ok_or(MechError::WrongSeppukuStage { expected: "second cut" })?;

        let resilience = D20Test::roll(
            character.ability(Ability::Resilience),
            0,
            SEPPUKU_RESILIENCE_DR,
            rng,
        );

        let mut honor_roll = None;
        let mut honor_after = None;
        let mut damage = None;
        if resilience.grade.is_success() {
            let roll = DiceExpr {
                count: 2,
                sides: 6,
                modifier: 2,
            }
            .roll(rng);
            honor_after = Some(character.honor.adjust(roll.total()));
            honor_roll = Some(roll);
        } else if self.assisted {
            let roll = DiceExpr {
                count: 1,
                sides: 6,
                modifier: 1,
            }
            .roll(rng);
            honor_after = Some(character.honor.adjust(roll.total()));
            honor_roll = Some(roll);
        } else {
            damage = Some(
                DiceExpr {
                    count: 1,
                    sides: 8,
                    modifier: 0,
                }
                .roll(rng),
            );
        }

        self.stage = SeppukuStage::Done;
        Ok(SeppukuProgress::Complete(SeppukuOutcome {
            assisted: self.assisted,
            spirit,
            resilience: Some(resilience),
            honor_roll,
            honor_after,
            damage,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use ronin_core::Abilities;

    fn samurai(spirit: i32, resilience: i32) -> Character {
        Character::new("Okatsu")
            .with_abilities(Abilities::new(2, 2, spirit, resilience))
            .with_honor(5)
    }

    #[test]
    fn abort_ends_the_rite() {
        let mut rite = SeppukuRite::new();
        assert_eq!(rite.confirm(false).unwrap(), SeppukuProgress::Aborted);
        assert_eq!(rite.stage(), SeppukuStage::Done);
        assert!(rite.confirm(true).is_err());
    }

    #[test]
    fn steps_must_come_in_order() {
        let mut rite = SeppukuRite::new();
        let mut character = samurai(6, 6);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            rite.second_cut(&mut character, &mut rng),
            Err(MechError::WrongSeppukuStage { .. })
        ));
        assert!(matches!(
            rite.choose_assistant(true, &character, &mut rng),
            Err(MechError::WrongSeppukuStage { .. })
        ));
    }

    #[test]
    fn spirit_failure_is_terminal() {
        let mut rng = StdRng::seed_from_u64(0);
        loop {
            let mut rite = SeppukuRite::new();
            let character = samurai(-3, 2);
            rite.confirm(true).unwrap();
            match rite.choose_assistant(false, &character, &mut rng).unwrap() {
                SeppukuProgress::SpiritFailed(outcome) => {
                    assert!(!outcome.spirit.grade.is_success());
                    assert!(outcome.resilience.is_none());
                    assert_eq!(rite.stage(), SeppukuStage::Done);
                    break;
                }
                SeppukuProgress::AwaitingSecondCut { .. } => continue,
                other => panic!("unexpected progress: {other:?}"),
            }
        }
    }

    fn run_to_completion(
        assisted: bool,
        spirit: i32,
        resilience: i32,
        seed: u64,
    ) -> Option<(SeppukuOutcome, Character)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut character = samurai(spirit, resilience);
        let mut rite = SeppukuRite::new();
        rite.confirm(true).unwrap();
        match rite.choose_assistant(assisted, &character, &mut rng).unwrap() {
            SeppukuProgress::AwaitingSecondCut { .. } => {}
            _ => return None,
        }
        match rite.second_cut(&mut character, &mut rng).unwrap() {
            SeppukuProgress::Complete(outcome) => Some((outcome, character)),
            other => panic!("unexpected progress: {other:?}"),
        }
    }

    #[test]
    fn success_restores_honor() {
        for seed in 0..64 {
            let Some((outcome, character)) = run_to_completion(false, 6, 6, seed) else {
                continue;
            };
            let resilience = outcome.resilience.unwrap();
            if resilience.grade.is_success() {
                let roll = outcome.honor_roll.unwrap();
                assert!((4..=14).contains(&roll.total()));
                assert_eq!(outcome.honor_after, Some(character.honor.value));
                assert!(character.honor.value >= 5);
                assert!(character.honor.value <= 20);
                return;
            }
        }
        panic!("no successful second cut in 64 seeds");
    }

    #[test]
    fn assisted_failure_restores_a_little() {
        for seed in 0..64 {
            let Some((outcome, character)) = run_to_completion(true, 6, -3, seed) else {
                continue;
            };
            if !outcome.resilience.unwrap().grade.is_success() {
                let roll = outcome.honor_roll.unwrap();
                assert!((2..=7).contains(&roll.total()));
                assert_eq!(outcome.honor_after, Some(character.honor.value));
                assert!(outcome.damage.is_none());
                return;
            }
        }
        panic!("no failed assisted cut in 64 seeds");
    }

    #[test]
    fn unassisted_failure_only_reports_damage() {
        for seed in 0..64 {
            let Some((outcome, character)) = run_to_completion(false, 6, -3, seed) else {
                continue;
            };
            if !outcome.resilience.unwrap().grade.is_success() {
                assert!(outcome.honor_roll.is_none());
                let damage = outcome.damage.unwrap();
                assert!((1..=8).contains(&damage.total()));
                assert_eq!(character.honor.value, 5);
                assert_eq!(character.hp.value, 10);
                return;
            }
        }
        panic!("no failed unassisted cut in 64 seeds");
    }

    #[test]
    fn honor_clamps_at_twenty() {
        for seed in 0..128 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut character = samurai(6, 6).with_honor(19);
            let mut rite = SeppukuRite::new();
            rite.confirm(true).unwrap();
            let SeppukuProgress::AwaitingSecondCut { .. } =
                rite.choose_assistant(true, &character, &mut rng).unwrap()
            else {
                continue;
            };
            let SeppukuProgress::Complete(outcome) =
                rite.second_cut(&mut character, &mut rng).unwrap()
            else {
                unreachable!()
            };
            if outcome.honor_roll.is_some() {
                assert_eq!(character.honor.value, 20);
                assert_eq!(outcome.honor_after, Some(20));
                return;
            }
        }
        panic!("no honor restoration in 128 seeds");
    }
}
