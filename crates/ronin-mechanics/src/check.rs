//! The d20 test at the heart of every check.
//!
//! Every resolver ends in the same shape: one d20, plus an ability
//! value, plus a situational modifier, against a difficulty rating. A
//! natural 20 always succeeds and a natural 1 always fails, regardless
//! of the total.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// How a d20 test landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Natural 20. Succeeds regardless of total.
    Critical,
    /// Total met or beat the difficulty rating.
    Success,
    /// Total fell short.
    Failure,
    /// Natural 1. Fails regardless of total.
    Fumble,
}

impl Grade {
    /// Classify a test. The natural die overrides the arithmetic.
    pub fn classify(d20: u32, total: i32, dr: i32) -> Self {
        match d20 {
            20 => Self::Critical,
            1 => Self::Fumble,
            _ if total >= dr => Self::Success,
            _ => Self::Failure,
        }
    }

    /// Whether the grade counts as a success.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Critical | Self::Success)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Critical => "critical",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Fumble => "fumble",
        };
        f.write_str(s)
    }
}

/// A resolved d20 test with its full arithmetic kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct D20Test {
    /// The natural die face.
    pub d20: u32,
    /// Ability value added to the die.
    pub ability_value: i32,
    /// Situational modifier added to the die.
    pub modifier: i32,
    /// Die face plus ability plus modifier.
    pub total: i32,
    /// Difficulty rating the total was compared against.
    pub dr: i32,
    /// The classified result.
    pub grade: Grade,
}

impl D20Test {
    /// Roll the d20 and classify against the difficulty rating.
    pub fn roll(ability_value: i32, modifier: i32, dr: i32, rng: &mut StdRng) -> Self {
        let d20 = rng.random_range(1..=20);
        let total = d20 as i32 + ability_value + modifier;
        Self {
            d20,
            ability_value,
            modifier,
            total,
            dr,
            grade: Grade::classify(d20, total, dr),
        }
    }
}

impl std::fmt::Display for D20Test {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "d20 {} {:+} {:+} = {} vs DR {}: {}",
            self.d20, self.ability_value, self.modifier, self.total, self.dr, self.grade
        )
    }
}
