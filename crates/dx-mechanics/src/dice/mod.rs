//! Dice types, rolled batches, and dice sources.
//!
//! A check rolls every die from a single [`Die`] type. Each roll event is
//! captured as an immutable [`ValueBatch`]; where the faces come from is
//! abstracted behind [`DiceSource`].

pub mod batch;
pub mod source;

pub use batch::ValueBatch;
pub use source::{DiceSource, ScriptedDice};

use serde::{Deserialize, Serialize};

use crate::error::{DxError, DxResult};

/// Fewest sides a die may have.
pub const MIN_SIDES: u32 = 2;

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die, the reference die for DX checks.
    #[default]
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// The lowest face on the die. An initial batch made only of these is a fumble.
    pub fn min_face(self) -> u32 {
        1
    }

    /// The highest face on the die. A batch containing a critical counts as this.
    pub fn max_face(self) -> u32 {
        self.sides()
    }

    /// Returns the die unchanged if it has at least [`MIN_SIDES`] sides.
    pub fn validate(self) -> DxResult<Self> {
        if self.sides() < MIN_SIDES {
            return Err(DxError::InvalidDie(self.sides()));
        }
        Ok(self)
    }

    /// Parse a die from a string like "d10", "D6", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "d4" => Some(Self::D4),
            "d6" => Some(Self::D6),
            "d8" => Some(Self::D8),
            "d10" => Some(Self::D10),
            "d12" => Some(Self::D12),
            "d20" => Some(Self::D20),
            "d100" => Some(Self::D100),
            other => {
                let num = other.strip_prefix('d')?.parse::<u32>().ok()?;
                Self::Custom(num).validate().ok()
            }
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::D4 => write!(f, "d4"),
            Self::D6 => write!(f, "d6"),
            Self::D8 => write!(f, "d8"),
            Self::D10 => write!(f, "d10"),
            Self::D12 => write!(f, "d12"),
            Self::D20 => write!(f, "d20"),
            Self::D100 => write!(f, "d100"),
            Self::Custom(n) => write!(f, "d{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_faces() {
        assert_eq!(Die::D10.min_face(), 1);
        assert_eq!(Die::D10.max_face(), 10);
        assert_eq!(Die::D6.max_face(), 6);
        assert_eq!(Die::Custom(30).max_face(), 30);
    }

    #[test]
    fn default_die_is_d10() {
        assert_eq!(Die::default(), Die::D10);
    }

    #[test]
    fn die_from_str() {
        assert_eq!(Die::from_str_tag("d10"), Some(Die::D10));
        assert_eq!(Die::from_str_tag("D6"), Some(Die::D6));
        assert_eq!(Die::from_str_tag(" d100 "), Some(Die::D100));
        assert_eq!(Die::from_str_tag("d30"), Some(Die::Custom(30)));
        assert_eq!(Die::from_str_tag("d1"), None);
        assert_eq!(Die::from_str_tag("ten"), None);
    }

    #[test]
    fn die_validation() {
        assert_eq!(Die::D10.validate(), Ok(Die::D10));
        assert_eq!(Die::Custom(2).validate(), Ok(Die::Custom(2)));
        assert_eq!(Die::Custom(1).validate(), Err(DxError::InvalidDie(1)));
        assert_eq!(Die::Custom(0).validate(), Err(DxError::InvalidDie(0)));
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D10.to_string(), "d10");
        assert_eq!(Die::Custom(30).to_string(), "d30");
    }
}
