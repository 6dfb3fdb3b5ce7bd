//! Engine configuration.

use crate::cascade::RoundCap;
use crate::dice::Die;
use crate::error::DxResult;

/// Default renderer budget, in characters.
pub const DEFAULT_MAX_OUTPUT_LENGTH: usize = 405;

/// Default cap on the number of batches in one cascade.
pub const DEFAULT_ROUND_CAP: u32 = 10_000;

/// Configuration shared by every check the engine runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Die rolled for every batch.
    pub die: Die,
    /// Longest rendered trace, in characters, before the compact form is used.
    pub max_output_length: usize,
    /// Most batches a single cascade may roll (at least 1).
    pub round_cap: u32,
    /// RNG seed for reproducible checks. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            die: Die::D10,
            max_output_length: DEFAULT_MAX_OUTPUT_LENGTH,
            round_cap: DEFAULT_ROUND_CAP,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the die type. Fails for dice with fewer than 2 sides.
    pub fn with_die(mut self, die: Die) -> DxResult<Self> {
        self.die = die.validate()?;
        Ok(self)
    }

    /// Set the renderer budget.
    pub fn with_max_output_length(mut self, max: usize) -> Self {
        self.max_output_length = max;
        self
    }

    /// Set the round cap (raised to 1 if lower).
    pub fn with_round_cap(mut self, cap: u32) -> Self {
        self.round_cap = cap.max(1);
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The continuation policy implied by `round_cap`.
    pub fn round_policy(&self) -> RoundCap {
        RoundCap::new(self.round_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::RerollPolicy;
    use crate::error::DxError;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.die, Die::D10);
        assert_eq!(cfg.max_output_length, 405);
        assert_eq!(cfg.round_cap, 10_000);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_die(Die::D6)
            .unwrap()
            .with_max_output_length(2000)
            .with_round_cap(50)
            .with_seed(7);
        assert_eq!(cfg.die, Die::D6);
        assert_eq!(cfg.max_output_length, 2000);
        assert_eq!(cfg.round_cap, 50);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn die_without_sides_is_rejected() {
        let err = EngineConfig::default().with_die(Die::Custom(0)).unwrap_err();
        assert_eq!(err, DxError::InvalidDie(0));
        assert!(EngineConfig::default().with_die(Die::Custom(1)).is_err());
    }

    #[test]
    fn round_cap_raised_to_one() {
        let cfg = EngineConfig::default().with_round_cap(0);
        assert_eq!(cfg.round_cap, 1);
    }

    #[test]
    fn round_policy_matches_cap() {
        let policy = EngineConfig::default().with_round_cap(3).round_policy();
        assert!(policy.should_continue(2));
        assert!(!policy.should_continue(3));
    }
}
