//! A roll session: one RNG, one journal, one dispatch surface.
//!
//! The host hands the session a character and a [`RollRequest`]; the
//! session routes to the right resolver, journals any finished outcome,
//! and holds seppuku rites across their intermediate steps. Seeding the
//! RNG makes a whole session replayable.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use ronin_core::{Ability, Character, ItemId};

use crate::error::{MechError, MechResult};
use crate::record::{OutcomeRecord, RollJournal};
use crate::rolls::{
    AbilityCheckInput, AttackInput, DefenseInput, ParryInput, SeppukuProgress, SeppukuRite,
    ability, advancement, attack, broken, defense, parry,
};

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for the session RNG.
    pub seed: u64,
}

impl SessionConfig {
    /// Configuration with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// A request for one roll or one seppuku step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RollRequest {
    /// An ability check.
    Ability {
        /// The ability to test.
        ability: Ability,
        /// The table's choices.
        input: AbilityCheckInput,
    },
    /// An attack with a specific weapon.
    Attack {
        /// The attacking weapon.
        weapon: ItemId,
        /// The table's choices.
        input: AttackInput,
    },
    /// A defense against incoming damage.
    Defense {
        /// The table's choices.
        input: DefenseInput,
    },
    /// A parry against incoming damage.
    Parry {
        /// The table's choices.
        input: ParryInput,
    },
    /// A consultation of the broken table.
    Broken,
    /// An end-of-chapter advancement.
    Advancement,
    /// Open a seppuku rite.
    SeppukuBegin,
    /// Answer the rite's confirmation.
    SeppukuConfirm {
        /// Whether the character goes through with it.
        proceed: bool,
    },
    /// Settle the kaishakunin question and test spirit.
    SeppukuAssistant {
        /// Whether a kaishakunin stands by.
        assisted: bool,
    },
    /// Make the second cut.
    SeppukuSecondCut,
}

/// A live roll session.
#[derive(Debug)]
pub struct RollSession {
    rng: StdRng,
    journal: RollJournal,
    pending_seppuku: Option<SeppukuRite>,
}

impl RollSession {
    /// Open a session from configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            journal: RollJournal::new(),
            pending_seppuku: None,
        }
    }

    /// The journal of everything resolved so far.
    pub fn journal(&self) -> &RollJournal {
        &self.journal
    }

    /// Whether a seppuku rite is waiting on its next step.
    pub fn seppuku_in_progress(&self) -> bool {
        self.pending_seppuku.is_some()
    }

    /// Route a request to its resolver.
    ///
    /// Returns the journaled record when the request finished a roll,
    /// and `None` for seppuku steps that leave the rite in progress.
    pub fn dispatch(
        &mut self,
        character: &mut Character,
        request: RollRequest,
    ) -> MechResult<Option<OutcomeRecord>> {
        let record = match request {
            RollRequest::Ability { ability, input } => Some(OutcomeRecord::Ability(
                ability::resolve(character, ability, input, &mut self.rng),
            )),
            RollRequest::Attack { weapon, input } => Some(OutcomeRecord::Attack(
                attack::resolve(character, weapon, &input, &mut self.rng)?,
            )),
            RollRequest::Defense { input } => Some(OutcomeRecord::Defense(defense::resolve(
                character,
                &input,
                &mut self.rng,
            )?)),
            RollRequest::Parry { input } => Some(OutcomeRecord::Parry(parry::resolve(
                character,
                &input,
                &mut self.rng,
            )?)),
            RollRequest::Broken => Some(OutcomeRecord::Broken(broken::resolve(
                character,
                &mut self.rng,
            ))),
            RollRequest::Advancement => Some(OutcomeRecord::Advancement(advancement::resolve(
                character,
                &mut self.rng,
            ))),
            RollRequest::SeppukuBegin => {
                self.pending_seppuku = Some(SeppukuRite::new());
                None
            }
            RollRequest::SeppukuConfirm { proceed } => {
                let rite = self
                    .pending_seppuku
                    .as_mut()
                    .ok_or(MechError::NoPendingSeppuku)?;
                match rite.confirm(proceed)? {
                    SeppukuProgress::Aborted => {
                        self.pending_seppuku = None;
                        None
                    }
                    _ => None,
                }
            }
            RollRequest::SeppukuAssistant { assisted } => {
                let rite = self
                    .pending_seppuku
                    .as_mut()
                    .ok_or(MechError::NoPendingSeppuku)?;
                match rite.choose_assistant(assisted, character, &mut self.rng)? {
                    SeppukuProgress::SpiritFailed(outcome) => {
                        self.pending_seppuku = None;
                        Some(OutcomeRecord::Seppuku(outcome))
                    }
                    _ => None,
                }
            }
            RollRequest::SeppukuSecondCut => {
                let rite = self
                    .pending_seppuku
                    .as_mut()
                    .ok_or(MechError::NoPendingSeppuku)?;
                match rite.second_cut(character, &mut self.rng)? {
                    SeppukuProgress::Complete(outcome) => {
                        self.pending_seppuku = None;
                        Some(OutcomeRecord::Seppuku(outcome))
                    }
                    _ => None,
                }
            }
        };

        if let Some(record) = &record {
            self.journal.append(character.name.clone(), record.clone());
        }
        Ok(record)
    }
}
