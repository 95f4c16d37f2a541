//! Tunable knobs for the destruction simulation
//!
//! Defaults match the editor's canonical values; callers adjust them to
//! trade accuracy against recursion cost.

use serde::{Deserialize, Serialize};

use crate::core::{MechlabError, Result};
use crate::crits::constants::{DEFAULT_PRUNE_THRESHOLD, HEALTH_TOLERANCE, REFERENCE_STRIKE_DAMAGE};

/// Simulation tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationTuning {
    /// Damage of one reference strike
    ///
    /// The strike count is `ceil(structure_hp / reference_damage)`, so this
    /// value sets the granularity of the whole simulation. Whether it should
    /// instead derive from an actual loadout's alpha-strike damage is an open
    /// configuration point; the canonical constant is the default.
    pub reference_damage: f64,

    /// Slack when comparing grouped item health against one increment
    ///
    /// Grouped health is only ever decremented in reference-damage steps, so
    /// this only has to absorb accumulated floating-point error, not model
    /// uncertainty.
    pub health_tolerance: f64,

    /// Negligible-probability threshold below which a branch is dropped
    ///
    /// The dropped tail mass is simply discarded: accumulated destruction
    /// probabilities are a lower bound that approaches the exact value as
    /// this shrinks toward zero. Smaller values explore a larger tree.
    pub prune_threshold: f64,
}

impl SimulationTuning {
    /// Validated constructor; nothing is clamped silently
    pub fn new(reference_damage: f64, health_tolerance: f64, prune_threshold: f64) -> Result<Self> {
        if !(reference_damage > 0.0) {
            return Err(MechlabError::InvalidTuning(format!(
                "reference damage must be positive, got {}",
                reference_damage
            )));
        }
        if !(health_tolerance >= 0.0) {
            return Err(MechlabError::InvalidTuning(format!(
                "health tolerance must be non-negative, got {}",
                health_tolerance
            )));
        }
        if !(prune_threshold >= 0.0) {
            return Err(MechlabError::InvalidTuning(format!(
                "prune threshold must be non-negative, got {}",
                prune_threshold
            )));
        }
        Ok(Self {
            reference_damage,
            health_tolerance,
            prune_threshold,
        })
    }
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self {
            reference_damage: REFERENCE_STRIKE_DAMAGE,
            health_tolerance: HEALTH_TOLERANCE,
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
        }
    }
}
