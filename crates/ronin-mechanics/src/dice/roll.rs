//! The result of rolling a dice expression.

use serde::{Deserialize, Serialize};

/// Individual die faces plus the flat modifier of the expression that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Each die's face, in roll order.
    pub rolls: Vec<u32>,
    /// Flat modifier carried from the expression.
    pub modifier: i32,
}

impl RollResult {
    /// Sum of all faces plus the modifier.
    pub fn total(&self) -> i32 {
        self.rolls.iter().map(|&r| r as i32).sum::<i32>() + self.modifier
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rolls.is_empty() {
            return write!(f, "{}", self.modifier);
        }
        let faces = self
            .rolls
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match self.modifier.cmp(&0) {
            std::cmp::Ordering::Equal => write!(f, "[{faces}] = {}", self.total()),
            _ => write!(f, "[{faces}] {:+} = {}", self.modifier, self.total()),
        }
    }
}
