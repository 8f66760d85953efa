//! Error types for roll resolution.

use thiserror::Error;

use ronin_core::CoreError;

/// Convenience result alias for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

/// Errors from dice parsing and roll resolution.
#[derive(Debug, Error)]
pub enum MechError {
    /// A ranged weapon fires ammunition but none is selected.
    #[error("no ammunition selected for ranged weapon")]
    NoAmmoSelected,

    /// The selected ammunition stack is empty.
    #[error("no ammunition remaining")]
    NoAmmoRemaining,

    /// A dice expression could not be parsed.
    #[error("invalid dice expression: {0}")]
    InvalidDiceExpr(String),

    /// A seppuku step was invoked out of order.
    #[error("seppuku rite is not at the {expected} stage")]
    WrongSeppukuStage {
        /// The stage the invoked step requires.
        expected: &'static str,
    },

    /// A seppuku step was invoked with no rite in progress.
    #[error("no seppuku rite in progress")]
    NoPendingSeppuku,

    /// An equipment or character rule was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A journal record failed to serialize.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}
