//! Outcome records and the session journal.
//!
//! Every resolved roll becomes an [`OutcomeRecord`], a tagged union the
//! host can serialize for chat display or replay. The journal keeps the
//! records in order with a timestamp and the actor's name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MechResult;
use crate::rolls::{
    AbilityCheckOutcome, AdvancementOutcome, AttackOutcome, BrokenOutcome, DefenseOutcome,
    ParryOutcome, SeppukuOutcome,
};

/// One resolved roll of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum OutcomeRecord {
    /// An ability check.
    Ability(AbilityCheckOutcome),
    /// An attack.
    Attack(AttackOutcome),
    /// A defense.
    Defense(DefenseOutcome),
    /// A parry.
    Parry(ParryOutcome),
    /// A consultation of the broken table.
    Broken(BrokenOutcome),
    /// An advancement.
    Advancement(AdvancementOutcome),
    /// A completed seppuku rite.
    Seppuku(SeppukuOutcome),
}

impl OutcomeRecord {
    /// A short label for the record kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ability(_) => "ability",
            Self::Attack(_) => "attack",
            Self::Defense(_) => "defense",
            Self::Parry(_) => "parry",
            Self::Broken(_) => "broken",
            Self::Advancement(_) => "advancement",
            Self::Seppuku(_) => "seppuku",
        }
    }
}

/// A journaled record with its timestamp and actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the roll was resolved.
    pub timestamp: DateTime<Utc>,
    /// Name of the character that rolled.
    pub actor: String,
    /// The resolved roll.
    pub record: OutcomeRecord,
}

/// An append-only log of resolved rolls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollJournal {
    entries: Vec<JournalEntry>,
}

impl RollJournal {
    /// An empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for the named actor, stamped now.
    pub fn append(&mut self, actor: impl Into<String>, record: OutcomeRecord) {
        self.entries.push(JournalEntry {
            timestamp: Utc::now(),
            actor: actor.into(),
            record,
        });
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the whole journal to pretty JSON.
    pub fn to_json(&self) -> MechResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ronin_core::{Abilities, Ability, Character};

    use crate::rolls::{AbilityCheckInput, ability};

    fn sample_record() -> OutcomeRecord {
        let character = Character::new("Okatsu").with_abilities(Abilities::new(2, 2, 1, 2));
        let mut rng = StdRng::seed_from_u64(1);
        OutcomeRecord::Ability(ability::resolve(
            &character,
            Ability::Spirit,
            AbilityCheckInput::default(),
            &mut rng,
        ))
    }

    #[test]
    fn journal_keeps_order() {
        let mut journal = RollJournal::new();
        assert!(journal.is_empty());
        journal.append("Okatsu", sample_record());
        journal.append("Hanzo", sample_record());
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.entries()[0].actor, "Okatsu");
        assert_eq!(journal.entries()[1].actor, "Hanzo");
    }

    #[test]
    fn records_round_trip_through_json() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"ability\""));
        let back: OutcomeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn journal_serializes() {
        let mut journal = RollJournal::new();
        journal.append("Okatsu", sample_record());
        let json = journal.to_json().unwrap();
        assert!(json.contains("Okatsu"));
    }
}
