//! Per-strike critical roll probabilities
//!
//! Supplied externally (the combat rules live in the data files); one miss
//! chance plus a chance for each possible roll count 1..K.

use serde::{Deserialize, Serialize};

use crate::core::{MechlabError, Result};
use crate::crits::constants::{STANDARD_MISS_CHANCE, STANDARD_ROLL_CHANCES};

/// Probability table for the critical outcome of one strike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritRollTable {
    miss_chance: f64,
    roll_chances: Vec<f64>,
}

impl CritRollTable {
    /// Build a table from a miss chance and the chance of 1..K rolls
    ///
    /// All entries must lie in [0, 1] and the whole table must cover the
    /// outcome space exactly.
    pub fn new(miss_chance: f64, roll_chances: Vec<f64>) -> Result<Self> {
        for &chance in std::iter::once(&miss_chance).chain(roll_chances.iter()) {
            if !(0.0..=1.0).contains(&chance) {
                return Err(MechlabError::InvalidRollTable(format!(
                    "chance {} outside [0, 1]",
                    chance
                )));
            }
        }
        let total: f64 = miss_chance + roll_chances.iter().sum::<f64>();
        if (total - 1.0).abs() > 1e-9 {
            return Err(MechlabError::InvalidRollTable(format!(
                "chances sum to {}, expected 1.0",
                total
            )));
        }
        Ok(Self {
            miss_chance,
            roll_chances,
        })
    }

    /// Degenerate table where every strike misses; useful as a control case
    pub fn always_miss() -> Self {
        Self {
            miss_chance: 1.0,
            roll_chances: Vec::new(),
        }
    }

    pub fn miss_chance(&self) -> f64 {
        self.miss_chance
    }

    /// Chance of exactly `index + 1` critical rolls
    pub fn roll_chances(&self) -> &[f64] {
        &self.roll_chances
    }
}

impl Default for CritRollTable {
    fn default() -> Self {
        Self {
            miss_chance: STANDARD_MISS_CHANCE,
            roll_chances: STANDARD_ROLL_CHANCES.to_vec(),
        }
    }
}
