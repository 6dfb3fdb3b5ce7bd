//! Turning a cascade into an achieved value.

use serde::{Deserialize, Serialize};

use crate::cascade::Cascade;

/// Whether the achieved value reached the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// The achieved value met or beat the target.
    Success,
    /// The achieved value fell short, or the check fumbled.
    Failure,
}

impl Comparison {
    /// Compare an achieved value against a target. A fumble always fails.
    pub fn judge(achieved_value: i64, target_value: i32, fumble: bool) -> Self {
        if !fumble && achieved_value >= i64::from(target_value) {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// Returns true for [`Comparison::Success`].
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}

/// The resolved numbers of a check that rolled at least one die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Every batch rolled.
    pub cascade: Cascade,
    /// The first batch showed nothing but minimum faces.
    pub fumble: bool,
    /// Sum of effective maxima plus modifier, or 0 on a fumble.
    pub achieved_value: i64,
    /// Outcome against the target, if one was given.
    pub comparison: Option<Comparison>,
}

impl CheckResult {
    /// Derive fumble, achieved value and comparison from a cascade.
    ///
    /// Returns `None` for an empty cascade: with no dice there is no achieved
    /// value, and the check is an automatic failure rather than a fumble.
    pub fn evaluate(cascade: Cascade, modifier: i32, target_value: Option<i32>) -> Option<Self> {
        let fumble = cascade.first()?.all_min_faces();

        let achieved_value = if fumble {
            0
        } else {
            cascade.total_effective_max() + i64::from(modifier)
        };
        let comparison = target_value.map(|t| Comparison::judge(achieved_value, t, fumble));

        Some(Self {
            cascade,
            fumble,
            achieved_value,
            comparison,
        })
    }

    /// Returns true if a target was given and reached.
    pub fn is_success(&self) -> bool {
        self.comparison.is_some_and(Comparison::is_success)
    }
}
