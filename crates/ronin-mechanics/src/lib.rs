//! Dice rolling and roll resolution for the RONIN rules engine.
//!
//! Everything random lives here: dice expressions, the d20 test shared
//! by every check, the seven roll resolvers (ability, attack, defense,
//! parry, broken, advancement, seppuku), and the session that routes
//! requests, journals outcomes, and keeps a seppuku rite alive across
//! its steps. Character data and equipment rules come from
//! [`ronin_core`].

/// The d20 test and its grading.
pub mod check;
/// Dice expressions and roll results.
pub mod dice;
/// Error types.
pub mod error;
/// Outcome records and the journal.
pub mod record;
/// The seven roll resolvers.
pub mod rolls;
/// The session: RNG, journal, and request dispatch.
pub mod session;

pub use check::{D20Test, Grade};
pub use dice::{DiceExpr, RollResult, roll_expr};
pub use error::{MechError, MechResult};
pub use record::{JournalEntry, OutcomeRecord, RollJournal};
pub use rolls::{
    AbilityAdvance, AbilityCheckInput, AbilityCheckOutcome, AbilityCheckPrompt,
    AdvancementOutcome, AttackInput, AttackOutcome, AttackPrompt, BrokenFate, BrokenOutcome,
    DamageExchange, DefenseInput, DefenseOutcome, DefensePrompt, HpTrial, Incapacity, ParryInput,
    ParryOutcome, ParryPrompt, SeppukuOutcome, SeppukuProgress, SeppukuRite, SeppukuStage,
};
pub use session::{RollRequest, RollSession, SessionConfig};
