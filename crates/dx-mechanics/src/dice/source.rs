//! Where rolled faces come from.

use std::collections::VecDeque;

use rand::Rng;

/// Supplies die faces on request.
///
/// Implementations must return exactly `count` faces, each in `1..=sides`.
/// The engine trusts this contract and does not re-check it. The cascade only
/// asks for dice with at least [`MIN_SIDES`](super::MIN_SIDES) sides.
///
/// Every [`rand::Rng`] is a dice source.
pub trait DiceSource {
    /// Roll `count` dice with `sides` sides each.
    fn roll(&mut self, count: u32, sides: u32) -> Vec<u32>;
}

impl<R: Rng> DiceSource for R {
    fn roll(&mut self, count: u32, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.random_range(1..=sides)).collect()
    }
}

/// Replays a fixed sequence of faces, in order.
///
/// Useful for tests and for re-running a recorded check. Once the script runs
/// dry every further die shows 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
    rolled: usize,
}

impl ScriptedDice {
    /// Create a source that will hand out `faces` in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            rolled: 0,
        }
    }

    /// Faces not yet handed out.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }

    /// Total number of dice rolled from this source so far.
    pub fn rolled(&self) -> usize {
        self.rolled
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, count: u32, _sides: u32) -> Vec<u32> {
        let mut out = Vec::with_capacity(count as usize);
        for _ in 0..count {
            match self.faces.pop_front() {
                Some(face) => out.push(face),
                None => {
                    tracing::warn!(rolled = self.rolled, "scripted dice exhausted, rolling 1");
                    out.push(1);
                }
            }
            self.rolled += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::{SmallRng, StdRng};

    #[test]
    fn rng_produces_valid_faces() {
        let mut rng = StdRng::seed_from_u64(42);
        let faces = rng.roll(50, 10);
        assert_eq!(faces.len(), 50);
        assert!(faces.iter().all(|f| (1..=10).contains(f)));
    }

    #[test]
    fn rng_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(a.roll(8, 10), b.roll(8, 10));
    }

    #[test]
    fn any_rng_is_a_source() {
        let mut small = SmallRng::seed_from_u64(7);
        let faces = small.roll(20, 6);
        assert_eq!(faces.len(), 20);
        assert!(faces.iter().all(|f| (1..=6).contains(f)));

        let mut thread = rand::rng();
        let faces = thread.roll(5, 10);
        assert_eq!(faces.len(), 5);
        assert!(faces.iter().all(|f| (1..=10).contains(f)));
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut dice = ScriptedDice::new([8, 3, 5, 2]);
        assert_eq!(dice.roll(3, 10), vec![8, 3, 5]);
        assert_eq!(dice.roll(1, 10), vec![2]);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.rolled(), 4);
    }

    #[test]
    fn scripted_exhaustion_rolls_ones() {
        let mut dice = ScriptedDice::new([7]);
        assert_eq!(dice.roll(3, 10), vec![7, 1, 1]);
    }

    #[test]
    fn zero_count_rolls_nothing() {
        let mut dice = ScriptedDice::new([7]);
        assert!(dice.roll(0, 10).is_empty());
        assert_eq!(dice.remaining(), 1);
    }
}
