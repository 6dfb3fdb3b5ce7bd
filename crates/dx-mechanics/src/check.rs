//! Check requests and the end-to-end check.

use serde::{Deserialize, Serialize};

use crate::cascade::{Cascade, RerollPolicy};
use crate::config::EngineConfig;
use crate::dice::{DiceSource, Die};
use crate::error::DxError;
use crate::outcome::{CheckResult, Comparison};

/// An already-parsed request to perform a DX check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Dice in the initial pool. Below 1 means automatic failure.
    pub dice_count: i32,
    /// Faces at or above this value explode. Below 2 is rejected.
    pub critical_threshold: i32,
    /// Added to the summed batches.
    pub modifier: i32,
    /// Value to meet or beat, if any.
    pub target_value: Option<i32>,
}

impl Default for CheckRequest {
    fn default() -> Self {
        Self {
            dice_count: 1,
            critical_threshold: 10,
            modifier: 0,
            target_value: None,
        }
    }
}

impl CheckRequest {
    /// Request `dice_count` dice exploding at `critical_threshold`.
    pub fn new(dice_count: i32, critical_threshold: i32) -> Self {
        Self {
            dice_count,
            critical_threshold,
            ..Self::default()
        }
    }

    /// Set the modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the target value.
    pub fn with_target(mut self, target_value: i32) -> Self {
        self.target_value = Some(target_value);
        self
    }
}

impl std::fmt::Display for CheckRequest {
    /// The canonical expression, e.g. `10DX8+5>=15`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}DX{}{}",
            self.dice_count,
            self.critical_threshold,
            format_modifier(self.modifier)
        )?;
        if let Some(target) = self.target_value {
            write!(f, ">={target}")?;
        }
        Ok(())
    }
}

/// Format a modifier as a signed suffix; zero is omitted.
pub fn format_modifier(modifier: i32) -> String {
    match modifier {
        0 => String::new(),
        m if m > 0 => format!("+{m}"),
        m => m.to_string(),
    }
}

/// How a check ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// The request was misconfigured; no dice were rolled.
    Rejected(DxError),
    /// Fewer than one die was requested; no dice were rolled.
    AutomaticFailure,
    /// Dice were rolled and resolved.
    Resolved(CheckResult),
}

impl CheckOutcome {
    /// The achieved value, if dice were rolled.
    pub fn achieved_value(&self) -> Option<i64> {
        match self {
            Self::Resolved(result) => Some(result.achieved_value),
            _ => None,
        }
    }

    /// The comparison against the target, if dice were rolled and a target given.
    pub fn comparison(&self) -> Option<Comparison> {
        match self {
            Self::Resolved(result) => result.comparison,
            _ => None,
        }
    }

    /// Returns true if the check fumbled.
    pub fn is_fumble(&self) -> bool {
        matches!(self, Self::Resolved(result) if result.fumble)
    }

    /// The resolved result, if dice were rolled.
    pub fn result(&self) -> Option<&CheckResult> {
        match self {
            Self::Resolved(result) => Some(result),
            _ => None,
        }
    }
}

/// Perform a check using the engine configuration's die and round cap.
pub fn perform_check<S>(
    request: &CheckRequest,
    config: &EngineConfig,
    source: &mut S,
) -> CheckOutcome
where
    S: DiceSource + ?Sized,
{
    perform_check_with(request, config.die, &config.round_policy(), source)
}

/// Perform a check with an explicit die and continuation policy.
pub fn perform_check_with<S, P>(
    request: &CheckRequest,
    die: Die,
    policy: &P,
    source: &mut S,
) -> CheckOutcome
where
    S: DiceSource + ?Sized,
    P: RerollPolicy + ?Sized,
{
    let cascade = match Cascade::roll(
        die,
        request.dice_count,
        request.critical_threshold,
        policy,
        source,
    ) {
        Ok(cascade) => cascade,
        Err(err) => {
            tracing::debug!(%request, error = %err, "check rejected");
            return CheckOutcome::Rejected(err);
        }
    };

    match CheckResult::evaluate(cascade, request.modifier, request.target_value) {
        Some(result) => {
            tracing::debug!(
                %request,
                achieved = result.achieved_value,
                fumble = result.fumble,
                rounds = result.cascade.rounds(),
                "check resolved"
            );
            CheckOutcome::Resolved(result)
        }
        None => CheckOutcome::AutomaticFailure,
    }
}
