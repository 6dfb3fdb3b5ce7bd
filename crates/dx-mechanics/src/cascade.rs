//! The roll/reroll loop.
//!
//! Round 0 rolls the requested pool. Every critical in a batch adds one die to
//! the next batch, and the cascade stops once a batch has no criticals or the
//! [`RerollPolicy`] declines another round.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceSource, Die, ValueBatch};
use crate::error::{DxError, DxResult};

/// The lowest critical threshold the engine accepts.
pub const MIN_CRITICAL_THRESHOLD: i32 = 2;

/// Decides whether another round of rerolls may be rolled.
pub trait RerollPolicy {
    /// Called before every round after the first, with that round's index.
    fn should_continue(&self, round_index: u32) -> bool;
}

impl<F> RerollPolicy for F
where
    F: Fn(u32) -> bool,
{
    fn should_continue(&self, round_index: u32) -> bool {
        self(round_index)
    }
}

/// Allows at most `cap` batches per cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCap {
    cap: u32,
}

impl RoundCap {
    /// Create a cap. Values below 1 are raised to 1.
    pub fn new(cap: u32) -> Self {
        Self { cap: cap.max(1) }
    }

    /// The maximum number of batches.
    pub fn cap(self) -> u32 {
        self.cap
    }
}

impl Default for RoundCap {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ROUND_CAP)
    }
}

impl RerollPolicy for RoundCap {
    fn should_continue(&self, round_index: u32) -> bool {
        round_index < self.cap
    }
}

/// Every batch rolled for one check, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cascade {
    batches: Vec<ValueBatch>,
    truncated: bool,
}

impl Cascade {
    /// A cascade with no batches, the result of asking for fewer than one die.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Run the roll/reroll loop.
    ///
    /// Returns [`DxError::InvalidDie`] if the die has fewer than 2 sides and
    /// [`DxError::CriticalTooLow`] if `critical_threshold` is below 2, in both
    /// cases without rolling. An empty cascade comes back, also without
    /// rolling, if `dice_count` is below 1.
    pub fn roll<S, P>(
        die: Die,
        dice_count: i32,
        critical_threshold: i32,
        policy: &P,
        source: &mut S,
    ) -> DxResult<Self>
    where
        S: DiceSource + ?Sized,
        P: RerollPolicy + ?Sized,
    {
        let die = die.validate()?;
        if critical_threshold < MIN_CRITICAL_THRESHOLD {
            return Err(DxError::CriticalTooLow(critical_threshold));
        }
        if dice_count < 1 {
            return Ok(Self::empty());
        }

        let threshold = critical_threshold as u32;
        let mut batches: Vec<ValueBatch> = Vec::new();
        let mut truncated = false;
        let mut num_dice = dice_count as u32;

        loop {
            let round = batches.len() as u32;
            if round > 0 && !policy.should_continue(round) {
                tracing::warn!(round, pending = num_dice, "reroll policy stopped the cascade");
                truncated = true;
                break;
            }

            let batch = ValueBatch::new(die, source.roll(num_dice, die.sides()), threshold);
            tracing::debug!(
                round,
                dice = num_dice,
                effective_max = batch.effective_max(),
                criticals = batch.critical_count(),
                "rolled batch"
            );

            num_dice = batch.critical_count();
            batches.push(batch);
            if num_dice == 0 {
                break;
            }
        }

        tracing::debug!(rounds = batches.len(), truncated, "cascade finished");
        Ok(Self { batches, truncated })
    }

    /// The batches, in the order they were rolled.
    pub fn batches(&self) -> &[ValueBatch] {
        &self.batches
    }

    /// The first batch, if any dice were rolled.
    pub fn first(&self) -> Option<&ValueBatch> {
        self.batches.first()
    }

    /// Number of rounds executed (one batch per round).
    pub fn rounds(&self) -> u32 {
        self.batches.len() as u32
    }

    /// Returns true if no dice were rolled.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Returns true if the policy stopped the cascade while criticals were
    /// still pending.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Total dice rolled across all batches.
    pub fn total_dice(&self) -> usize {
        self.batches.iter().map(ValueBatch::len).sum()
    }

    /// Sum of every batch's effective maximum.
    pub fn total_effective_max(&self) -> i64 {
        self.batches.iter().map(|b| i64::from(b.effective_max())).sum()
    }
}
