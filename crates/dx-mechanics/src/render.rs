//! Human-readable check traces.
//!
//! A resolved check renders its full trace:
//!
//! ```text
//! (3DX8+2>=15) > 10[3,5,8]+4[4]+2 > 16 > Success
//! ```
//!
//! When that would exceed the output budget the batch breakdown is replaced
//! by the round count, which keeps the line short however long the cascade:
//!
//! ```text
//! (1DX2) > ... > rounds: 812 > 8120
//! ```

use crate::check::{CheckOutcome, CheckRequest, format_modifier};
use crate::config::{DEFAULT_MAX_OUTPUT_LENGTH, EngineConfig};
use crate::error::DxError;
use crate::outcome::CheckResult;

/// Placed between the segments of a trace.
pub const SEPARATOR: &str = " > ";

/// Stands in for the batch breakdown in the compact form.
pub const ELISION: &str = "...";

/// Shown instead of a result when the critical threshold is below 2.
pub const CRITICAL_TOO_LOW: &str = "Critical value is too low. Specify 2 or higher.";

/// Shown instead of a result when the die has fewer than 2 sides.
pub const INVALID_DIE: &str = "Die needs at least 2 sides.";

/// Shown instead of a result when fewer than one die was requested.
pub const AUTOMATIC_FAILURE: &str = "Automatic failure";

/// Appended to the achieved value of a fumbled check.
pub const FUMBLE: &str = "(fumble)";

/// Renders check outcomes within a character budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    max_output_length: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT_LENGTH)
    }
}

impl Renderer {
    /// Create a renderer that keeps output within `max_output_length` characters.
    pub fn new(max_output_length: usize) -> Self {
        Self { max_output_length }
    }

    /// Create a renderer from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_output_length)
    }

    /// The character budget.
    pub fn max_output_length(&self) -> usize {
        self.max_output_length
    }

    /// Render any outcome as a single line.
    pub fn render(&self, request: &CheckRequest, outcome: &CheckOutcome) -> String {
        match outcome {
            CheckOutcome::Rejected(DxError::CriticalTooLow(_)) => {
                join([expression(request), CRITICAL_TOO_LOW.to_string()])
            }
            CheckOutcome::Rejected(DxError::InvalidDie(_)) => {
                join([expression(request), INVALID_DIE.to_string()])
            }
            CheckOutcome::AutomaticFailure => {
                join([expression(request), AUTOMATIC_FAILURE.to_string()])
            }
            CheckOutcome::Resolved(result) => self.render_result(request, result),
        }
    }

    /// Render a resolved check, falling back to the compact form if the full
    /// trace is over budget.
    pub fn render_result(&self, request: &CheckRequest, result: &CheckResult) -> String {
        let long = render_long(request, result);
        let length = long.chars().count();
        if length <= self.max_output_length {
            return long;
        }

        tracing::debug!(
            length,
            budget = self.max_output_length,
            rounds = result.cascade.rounds(),
            "trace over budget, using compact form"
        );
        render_compact(request, result)
    }
}

/// The full trace: expression, every batch, achieved value, comparison.
pub fn render_long(request: &CheckRequest, result: &CheckResult) -> String {
    let batches: Vec<String> = result
        .cascade
        .batches()
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut parts = vec![
        expression(request),
        format!("{}{}", batches.join("+"), format_modifier(request.modifier)),
        achieved(result),
    ];
    parts.extend(result.comparison.map(|c| c.to_string()));
    join(parts)
}

/// The compact trace: expression, elision marker, round count, achieved
/// value, comparison.
pub fn render_compact(request: &CheckRequest, result: &CheckResult) -> String {
    let mut parts = vec![
        expression(request),
        ELISION.to_string(),
        format!("rounds: {}", result.cascade.rounds()),
        achieved(result),
    ];
    parts.extend(result.comparison.map(|c| c.to_string()));
    join(parts)
}

fn expression(request: &CheckRequest) -> String {
    format!("({request})")
}

fn achieved(result: &CheckResult) -> String {
    if result.fumble {
        format!("{} {FUMBLE}", result.achieved_value)
    } else {
        result.achieved_value.to_string()
    }
}

fn join(parts: impl IntoIterator<Item = String>) -> String {
    parts.into_iter().collect::<Vec<_>>().join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::perform_check;
    use crate::dice::ScriptedDice;

    fn outcome(request: &CheckRequest, faces: impl IntoIterator<Item = u32>) -> CheckOutcome {
        let mut dice = ScriptedDice::new(faces);
        perform_check(request, &EngineConfig::default(), &mut dice)
    }

    #[test]
    fn long_form_with_target() {
        let request = CheckRequest::new(3, 8).with_modifier(2).with_target(15);
        let text = Renderer::default().render(&request, &outcome(&request, [8, 3, 5, 4]));
        assert_eq!(text, "(3DX8+2>=15) > 10[3,5,8]+4[4]+2 > 16 > Success");
    }

    #[test]
    fn long_form_without_target_has_no_label() {
        let request = CheckRequest::new(2, 10).with_modifier(-1);
        let text = Renderer::default().render(&request, &outcome(&request, [6, 2]));
        assert_eq!(text, "(2DX10-1) > 6[2,6]-1 > 5");
    }

    #[test]
    fn fumble_annotation() {
        let request = CheckRequest::new(3, 10).with_modifier(4).with_target(1);
        let text = Renderer::default().render(&request, &outcome(&request, [1, 1, 1]));
        assert_eq!(text, "(3DX10+4>=1) > 1[1,1,1]+4 > 0 (fumble) > Failure");
    }

    #[test]
    fn rejected_message() {
        let request = CheckRequest::new(2, 1);
        let text = Renderer::default().render(&request, &outcome(&request, std::iter::empty()));
        assert_eq!(text, "(2DX1) > Critical value is too low. Specify 2 or higher.");
    }

    #[test]
    fn invalid_die_message() {
        let request = CheckRequest::new(2, 10);
        let config = EngineConfig {
            die: crate::dice::Die::Custom(0),
            ..EngineConfig::default()
        };
        let mut dice = ScriptedDice::default();
        let outcome = perform_check(&request, &config, &mut dice);
        let text = Renderer::default().render(&request, &outcome);
        assert_eq!(text, "(2DX10) > Die needs at least 2 sides.");
    }

    #[test]
    fn automatic_failure_message() {
        let request = CheckRequest::new(0, 10).with_target(8);
        let text = Renderer::default().render(&request, &outcome(&request, std::iter::empty()));
        assert_eq!(text, "(0DX10>=8) > Automatic failure");
    }

    #[test]
    fn long_cascade_falls_back_to_compact() {
        let request = CheckRequest::new(1, 10).with_target(100);
        let faces = std::iter::repeat_n(10, 199).chain([3]);
        let text = Renderer::default().render(&request, &outcome(&request, faces));
        assert_eq!(text, "(1DX10>=100) > ... > rounds: 200 > 1993 > Success");
    }

    #[test]
    fn budget_boundary_is_inclusive() {
        let request = CheckRequest::new(2, 10);
        let result = outcome(&request, [6, 2]);
        let long = "(2DX10) > 6[2,6] > 6";
        let exact = Renderer::new(long.chars().count());
        assert_eq!(exact.render(&request, &result), long);

        let short = Renderer::new(long.chars().count() - 1);
        assert_eq!(short.render(&request, &result), "(2DX10) > ... > rounds: 1 > 6");
    }

    #[test]
    fn compact_form_keeps_fumble() {
        let request = CheckRequest::new(2, 10).with_target(3);
        let result = outcome(&request, [1, 1]);
        let text = Renderer::new(0).render(&request, &result);
        assert_eq!(text, "(2DX10>=3) > ... > rounds: 1 > 0 (fumble) > Failure");
    }

    #[test]
    fn renderer_from_config() {
        let config = EngineConfig::default().with_max_output_length(2000);
        assert_eq!(Renderer::from_config(&config).max_output_length(), 2000);
    }
}
