//! Clamped numeric resources (hit points, honor).

use serde::{Deserialize, Serialize};

/// A numeric resource clamped between a minimum and a maximum.
///
/// Hit points run 0..=max; honor runs 1..=20. The maximum itself can grow
/// (advancement raises max HP) but never shrinks through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Current value.
    pub value: i32,
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
}

impl Resource {
    /// Create a resource, clamping the initial value into range.
    pub fn new(value: i32, min: i32, max: i32) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.value = (self.value + delta).clamp(self.min, self.max);
        self.value
    }

    /// Set the value directly, clamping to bounds. Returns the new value.
    pub fn set(&mut self, value: i32) -> i32 {
        self.value = value.clamp(self.min, self.max);
        self.value
    }

    /// Raise the maximum by a non-negative delta.
    pub fn raise_max(&mut self, delta: i32) {
        self.max += delta.max(0);
    }

    /// Returns true if the resource sits at its minimum.
    pub fn is_empty(&self) -> bool {
        self.value <= self.min
    }

    /// Returns true if the resource sits at its maximum.
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}
