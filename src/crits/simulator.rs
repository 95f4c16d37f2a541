//! Branch-and-prune enumeration of critical destruction outcomes
//!
//! The decision tree is {per-strike critical outcome} x {per-roll target}.
//! Every branch works on an independent copy of the destruction state; the
//! per-item destruction accumulators are the only thing shared across the
//! recursion, owned by the top-level simulation call. Branches below the
//! pruning threshold are dropped, which keeps the explored tree close to
//! linear in strikes x items instead of exponential.

use ahash::AHashMap;

use crate::crits::section::{ItemId, ModifierSet, SectionProfile};
use crate::crits::state::{DestructionState, RollOutcome};
use crate::crits::table::CritRollTable;
use crate::crits::tuning::SimulationTuning;

/// Shared result of one simulation run
#[derive(Debug, Default)]
struct SimulationOutcome {
    /// Probability mass banked per item at the moment of destruction
    destroyed: AHashMap<ItemId, f64>,
    /// Mass dropped by pruning; the destruction accumulators are a lower
    /// bound short of the exact answer by at most this much
    pruned_mass: f64,
}

/// Destruction-probability simulator for one structural section
///
/// `simulate` recomputes internal state from scratch;
/// `probability_of_destruction` reads an already-settled result and never
/// observes a partially-consistent state.
#[derive(Debug, Clone)]
pub struct CriticalDestructionSimulator {
    section: SectionProfile,
    table: CritRollTable,
    tuning: SimulationTuning,
    results: AHashMap<ItemId, f64>,
}

impl CriticalDestructionSimulator {
    pub fn new(section: SectionProfile, table: CritRollTable, tuning: SimulationTuning) -> Self {
        Self {
            section,
            table,
            tuning,
            results: AHashMap::new(),
        }
    }

    /// Simulator with the editor's canonical roll table and tuning
    pub fn with_defaults(section: SectionProfile) -> Self {
        Self::new(
            section,
            CritRollTable::default(),
            SimulationTuning::default(),
        )
    }

    /// Recompute destruction probabilities under the given modifiers
    ///
    /// The section absorbs `ceil(structure_hp / reference_damage)` reference
    /// strikes; results are settled once this returns.
    pub fn simulate(&mut self, modifiers: &ModifierSet) {
        let structure_hp = self.section.structure_hp(modifiers);
        let strikes = (structure_hp / self.tuning.reference_damage).ceil().max(0.0) as u32;
        let state = DestructionState::from_section(&self.section);
        let original = state.multiplicities();

        let mut outcome = SimulationOutcome::default();
        self.resolve_strikes(state, strikes, 1.0, &mut outcome);
        tracing::debug!(
            "Simulated {} strikes against {}: {} item groups, pruned mass {}",
            strikes,
            self.section.name,
            original.len(),
            outcome.pruned_mass
        );

        self.results = outcome
            .destroyed
            .into_iter()
            .map(|(id, mass)| {
                let count = original.get(&id).copied().unwrap_or(1).max(1);
                (id, mass / count as f64)
            })
            .collect();
    }

    /// Probability that the item is destroyed by critical damage before the
    /// section's structure fails; 0.0 for items absent from the last
    /// simulation
    pub fn probability_of_destruction(&self, item: ItemId) -> f64 {
        self.results.get(&item).copied().unwrap_or(0.0)
    }

    fn resolve_strikes(
        &self,
        state: DestructionState,
        strikes_left: u32,
        probability: f64,
        outcome: &mut SimulationOutcome,
    ) {
        if strikes_left == 0 {
            return;
        }
        if probability < self.tuning.prune_threshold {
            outcome.pruned_mass += probability;
            tracing::trace!("Pruned branch at {} strikes left", strikes_left);
            return;
        }
        let miss = self.table.miss_chance();
        if miss > 0.0 {
            self.resolve_strikes(state.clone(), strikes_left - 1, probability * miss, outcome);
        }
        for (index, &chance) in self.table.roll_chances().iter().enumerate() {
            if chance == 0.0 {
                continue;
            }
            self.resolve_rolls(
                state.clone(),
                (index + 1) as u32,
                strikes_left,
                probability * chance,
                outcome,
            );
        }
    }

    fn resolve_rolls(
        &self,
        mut state: DestructionState,
        rolls_left: u32,
        strikes_left: u32,
        probability: f64,
        outcome: &mut SimulationOutcome,
    ) {
        if probability < self.tuning.prune_threshold {
            outcome.pruned_mass += probability;
            return;
        }
        let targets = if rolls_left == 0 {
            Vec::new()
        } else {
            state.targets()
        };
        if targets.is_empty() {
            // Strike resolved (or nothing left to hit this strike)
            state.end_strike();
            self.resolve_strikes(state, strikes_left - 1, probability, outcome);
            return;
        }
        for (index, weight) in targets {
            let branch_probability = probability * weight;
            let mut branch = state.clone();
            let roll = branch.apply_roll(
                index,
                self.tuning.reference_damage,
                self.tuning.health_tolerance,
            );
            if roll == RollOutcome::Destroyed {
                let id = branch.id_of(index);
                *outcome.destroyed.entry(id).or_insert(0.0) += branch_probability;
            }
            self.resolve_rolls(branch, rolls_left - 1, strikes_left, branch_probability, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crits::section::ItemProfile;

    /// Table where every strike lands exactly one critical roll
    fn always_one_roll() -> CritRollTable {
        CritRollTable::new(0.0, vec![1.0]).unwrap()
    }

    fn exhaustive_tuning() -> SimulationTuning {
        SimulationTuning::new(10.0, 1e-6, 0.0).unwrap()
    }

    #[test]
    fn test_all_miss_table_destroys_nothing() {
        // One 10-health item and one engine sharing a 2-slot section,
        // ceil(20/10) = 2 strikes, degenerate 100% miss chance
        let section = SectionProfile::new(
            "Side Torso",
            20.0,
            vec![
                ItemProfile::new(ItemId(1), "Ammo Rack", 1, 10.0, 1),
                ItemProfile::engine(ItemId(0), 1),
            ],
        );
        let mut simulator = CriticalDestructionSimulator::new(
            section,
            CritRollTable::always_miss(),
            SimulationTuning::default(),
        );
        simulator.simulate(&ModifierSet::default());
        assert_eq!(simulator.probability_of_destruction(ItemId(1)), 0.0);
        assert_eq!(simulator.probability_of_destruction(ItemId(0)), 0.0);
    }

    #[test]
    fn test_sole_item_with_guaranteed_roll_dies_immediately() {
        let section = SectionProfile::new(
            "Left Arm",
            30.0,
            vec![ItemProfile::heat_sink(ItemId(4))],
        );
        let mut simulator =
            CriticalDestructionSimulator::new(section, always_one_roll(), exhaustive_tuning());
        simulator.simulate(&ModifierSet::default());
        // Every path destroys the sink on the first roll of the first strike
        assert!((simulator.probability_of_destruction(ItemId(4)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unqueried_item_reports_zero() {
        let section = SectionProfile::new("Left Arm", 30.0, vec![]);
        let mut simulator = CriticalDestructionSimulator::with_defaults(section);
        simulator.simulate(&ModifierSet::default());
        assert_eq!(simulator.probability_of_destruction(ItemId(99)), 0.0);
    }

    #[test]
    fn test_results_reset_between_simulations() {
        let section = SectionProfile::new(
            "Right Torso",
            20.0,
            vec![ItemProfile::heat_sink(ItemId(2))],
        );
        let mut simulator =
            CriticalDestructionSimulator::new(section, always_one_roll(), exhaustive_tuning());
        simulator.simulate(&ModifierSet::default());
        assert!(simulator.probability_of_destruction(ItemId(2)) > 0.0);
        // Shrinking structure to nothing leaves zero strikes
        let gutted = ModifierSet {
            structure_multiplier: 0.0,
        };
        simulator.simulate(&gutted);
        assert_eq!(simulator.probability_of_destruction(ItemId(2)), 0.0);
    }

    #[test]
    fn test_multiplicity_two_group_fully_destroyed() {
        // Grouped health 20 takes one spreading hit, then two kills
        let section = SectionProfile::new(
            "Right Leg",
            30.0,
            vec![ItemProfile::new(ItemId(5), "Heat Sink", 1, 10.0, 2)],
        );
        let mut simulator =
            CriticalDestructionSimulator::new(section, always_one_roll(), exhaustive_tuning());
        simulator.simulate(&ModifierSet::default());
        assert!((simulator.probability_of_destruction(ItemId(5)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_banked_mass_is_bounded_by_one() {
        let section = SectionProfile::new(
            "Center Torso",
            30.0,
            vec![
                ItemProfile::new(ItemId(1), "Gyro", 4, 20.0, 1),
                ItemProfile::engine(ItemId(0), 6),
            ],
        );
        let mut simulator = CriticalDestructionSimulator::new(
            section,
            CritRollTable::default(),
            exhaustive_tuning(),
        );
        simulator.simulate(&ModifierSet::default());
        let banked = simulator.probability_of_destruction(ItemId(1));
        assert!(banked > 0.0);
        assert!(banked <= 1.0);
    }

    #[test]
    fn test_larger_prune_threshold_only_loses_mass() {
        let section = SectionProfile::new(
            "Left Torso",
            30.0,
            vec![ItemProfile::new(ItemId(3), "Ammo Rack", 1, 10.0, 1)],
        );
        let mut probabilities = Vec::new();
        for threshold in [1e-2, 1e-4, 0.0] {
            let tuning = SimulationTuning::new(10.0, 1e-6, threshold).unwrap();
            let mut simulator = CriticalDestructionSimulator::new(
                section.clone(),
                CritRollTable::default(),
                tuning,
            );
            simulator.simulate(&ModifierSet::default());
            probabilities.push(simulator.probability_of_destruction(ItemId(3)));
        }
        assert!(probabilities[0] <= probabilities[1] + 1e-12);
        assert!(probabilities[1] <= probabilities[2] + 1e-12);
        // Unpruned: destruction happens unless all three strikes miss
        let exact = 1.0 - 0.58f64.powi(3);
        assert!((probabilities[2] - exact).abs() < 1e-9);
    }
}
