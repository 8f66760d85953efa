//! The four RONIN abilities and their scores.

use serde::{Deserialize, Serialize};

/// One of the four character abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Physical strength and endurance. Drives melee attacks and the
    /// carrying-capacity thresholds.
    Vigor,
    /// Speed and reflexes. Drives defense; penalized by heavy armor.
    Swiftness,
    /// Willpower and focus. Drives ranged attacks.
    Spirit,
    /// Toughness of body and mind. Drives parries.
    Resilience,
}

impl Ability {
    /// All four abilities, in sheet order.
    pub const ALL: [Self; 4] = [Self::Vigor, Self::Swiftness, Self::Spirit, Self::Resilience];

    /// Parse an ability from its lowercase key.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vigor" => Some(Self::Vigor),
            "swiftness" => Some(Self::Swiftness),
            "spirit" => Some(Self::Spirit),
            "resilience" => Some(Self::Resilience),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vigor => write!(f, "vigor"),
            Self::Swiftness => write!(f, "swiftness"),
            Self::Spirit => write!(f, "spirit"),
            Self::Resilience => write!(f, "resilience"),
        }
    }
}

/// A character's four ability scores, typically in the range -3..=+6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    /// Vigor score.
    pub vigor: i32,
    /// Swiftness score.
    pub swiftness: i32,
    /// Spirit score.
    pub spirit: i32,
    /// Resilience score.
    pub resilience: i32,
}

impl Abilities {
    /// Create a score block with explicit values.
    pub fn new(vigor: i32, swiftness: i32, spirit: i32, resilience: i32) -> Self {
        Self {
            vigor,
            swiftness,
            spirit,
            resilience,
        }
    }

    /// Get the score for an ability.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Vigor => self.vigor,
            Ability::Swiftness => self.swiftness,
            Ability::Spirit => self.spirit,
            Ability::Resilience => self.resilience,
        }
    }

    /// Set the score for an ability.
    pub fn set(&mut self, ability: Ability, value: i32) {
        match ability {
            Ability::Vigor => self.vigor = value,
            Ability::Swiftness => self.swiftness = value,
            Ability::Spirit => self.spirit = value,
            Ability::Resilience => self.resilience = value,
        }
    }
}
