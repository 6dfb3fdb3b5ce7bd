//! A single batch of rolled dice.

use serde::{Deserialize, Serialize};

use super::Die;

/// The faces produced by one roll event, together with the critical threshold
/// in effect for it.
///
/// Faces are kept in the order they were rolled; sorting only happens when the
/// batch is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueBatch {
    /// The die every face was rolled on.
    pub die: Die,
    /// Faces as rolled.
    pub faces: Vec<u32>,
    /// A face at or above this value is a critical.
    pub critical_threshold: u32,
}

impl ValueBatch {
    /// Capture a rolled batch.
    pub fn new(die: Die, faces: Vec<u32>, critical_threshold: u32) -> Self {
        Self {
            die,
            faces,
            critical_threshold,
        }
    }

    /// Returns true if `face` meets or exceeds the critical threshold.
    pub fn is_critical(&self, face: u32) -> bool {
        face >= self.critical_threshold
    }

    /// The batch's contribution to the achieved value.
    ///
    /// Any critical lifts the batch to the die's highest face, whatever was
    /// actually rolled. Otherwise this is the largest face, or 0 if empty.
    pub fn effective_max(&self) -> u32 {
        if self.faces.iter().any(|&face| self.is_critical(face)) {
            self.die.max_face()
        } else {
            self.faces.iter().copied().max().unwrap_or(0)
        }
    }

    /// Number of faces at or above the critical threshold.
    ///
    /// This is also the number of dice rolled in the next batch.
    pub fn critical_count(&self) -> u32 {
        self.faces.iter().filter(|&&face| self.is_critical(face)).count() as u32
    }

    /// Returns true if every face shows the die's lowest value.
    pub fn all_min_faces(&self) -> bool {
        !self.faces.is_empty() && self.faces.iter().all(|&face| face == self.die.min_face())
    }

    /// Faces in ascending order.
    pub fn sorted_faces(&self) -> Vec<u32> {
        let mut faces = self.faces.clone();
        faces.sort_unstable();
        faces
    }

    /// Number of dice in the batch.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the batch holds no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl std::fmt::Display for ValueBatch {
    /// Renders as `effective_max[sorted,faces]`, e.g. `10[3,5,8]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.sorted_faces().iter().map(u32::to_string).collect();
        write!(f, "{}[{}]", self.effective_max(), faces.join(","))
    }
}
