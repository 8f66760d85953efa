//! Dice expressions and rolling.
//!
//! Damage formulas, armor protection, and result tables all speak the
//! same small notation: `NdM`, optionally followed by `+K` or `-K`. The
//! count defaults to 1 ("d6" is "1d6"), surrounding parentheses are
//! tolerated, and a bare integer is a constant roll with no dice — armor
//! category 0 protects with the expression "0".

pub mod roll;

pub use roll::RollResult;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Upper bound on dice per expression, to keep malformed input cheap.
const MAX_COUNT: u32 = 100;

/// A parsed dice expression: `count` dice of `sides` sides, plus a flat
/// modifier. `count == 0` is a pure constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice rolled.
    pub count: u32,
    /// Sides per die (meaningless when `count` is 0).
    pub sides: u32,
    /// Flat modifier added to the total.
    pub modifier: i32,
}

impl DiceExpr {
    /// A constant expression with no dice.
    pub fn constant(value: i32) -> Self {
        Self {
            count: 0,
            sides: 0,
            modifier: value,
        }
    }

    /// Parse standard dice notation.
    pub fn parse(input: &str) -> MechResult<Self> {
        let mut s = input.trim();
        // The original rolls expressions like "(1d6+1)".
        while s.starts_with('(') && s.ends_with(')') {
            s = s[1..s.len() - 1].trim();
        }
        if s.is_empty() {
            return Err(MechError::InvalidDiceExpr(input.to_string()));
        }

        let lower = s.to_lowercase();
        let Some(d_pos) = lower.find('d') else {
            let value = lower
                .parse::<i32>()
                .map_err(|_| MechError::InvalidDiceExpr(input.to_string()))?;
            return Ok(Self::constant(value));
        };

        let count_part = &lower[..d_pos];
        let count = if count_part.is_empty() {
            1
        } else {
            count_part
                .parse::<u32>()
                .map_err(|_| MechError::InvalidDiceExpr(input.to_string()))?
        };

        let rest = &lower[d_pos + 1..];
        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(sign_pos) => {
                let modifier = rest[sign_pos..]
                    .parse::<i32>()
                    .map_err(|_| MechError::InvalidDiceExpr(input.to_string()))?;
                (&rest[..sign_pos], modifier)
            }
            None => (rest, 0),
        };
        let sides = sides_part
            .parse::<u32>()
            .map_err(|_| MechError::InvalidDiceExpr(input.to_string()))?;

        if count == 0 || count > MAX_COUNT || sides < 2 {
            return Err(MechError::InvalidDiceExpr(input.to_string()));
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Roll the expression with the given RNG.
    pub fn roll(&self, rng: &mut StdRng) -> RollResult {
        let rolls = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides.max(2)))
            .collect();
        RollResult {
            rolls,
            modifier: self.modifier,
        }
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier.cmp(&0) {
            std::cmp::Ordering::Greater => write!(f, "+{}", self.modifier),
            std::cmp::Ordering::Less => write!(f, "{}", self.modifier),
            std::cmp::Ordering::Equal => Ok(()),
        }
    }
}

/// Parse and roll an expression in one step.
pub fn roll_expr(expr: &str, rng: &mut StdRng) -> MechResult<RollResult> {
    Ok(DiceExpr::parse(expr)?.roll(rng))
}
