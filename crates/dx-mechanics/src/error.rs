//! Error types for the check engine.

use serde::{Deserialize, Serialize};

/// Errors that can occur while setting up a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DxError {
    /// The critical threshold would make every die explode.
    #[error("critical value {0} is too low, must be 2 or higher")]
    CriticalTooLow(i32),

    /// The die has too few sides to roll.
    #[error("a die needs at least 2 sides, got {0}")]
    InvalidDie(u32),
}

/// Convenience result type for engine operations.
pub type DxResult<T> = Result<T, DxError>;
