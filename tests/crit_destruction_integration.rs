//! Critical destruction simulator integration tests
//!
//! Scenario-level checks: buffering by indestructible items, convergence
//! with growing strike counts, modifier effects, and the bounded-mass
//! property of the banked destruction probabilities.

use mechlab_core::crits::{
    CritRollTable, CriticalDestructionSimulator, ItemId, ItemProfile, ModifierSet, SectionProfile,
    SimulationTuning,
};

const ENGINE: ItemId = ItemId(0);
const GYRO: ItemId = ItemId(1);
const SINK: ItemId = ItemId(2);
const AMMO: ItemId = ItemId(3);

fn fine_tuning() -> SimulationTuning {
    SimulationTuning::new(10.0, 1e-6, 1e-9).unwrap()
}

#[test]
fn test_engine_never_dies() {
    let section = SectionProfile::new(
        "Center Torso",
        60.0,
        vec![
            ItemProfile::engine(ENGINE, 6),
            ItemProfile::new(GYRO, "Gyro", 4, 20.0, 1),
        ],
    );
    let mut simulator = CriticalDestructionSimulator::new(
        section,
        CritRollTable::default(),
        fine_tuning(),
    );
    simulator.simulate(&ModifierSet::default());
    assert_eq!(simulator.probability_of_destruction(ENGINE), 0.0);
    assert!(simulator.probability_of_destruction(GYRO) > 0.0);
}

#[test]
fn test_engine_buffers_its_neighbors() {
    let exposed = SectionProfile::new(
        "Side Torso",
        40.0,
        vec![ItemProfile::ammo_rack(AMMO)],
    );
    let buffered = SectionProfile::new(
        "Side Torso",
        40.0,
        vec![ItemProfile::ammo_rack(AMMO), ItemProfile::engine(ENGINE, 3)],
    );
    let mut without = CriticalDestructionSimulator::new(
        exposed,
        CritRollTable::default(),
        fine_tuning(),
    );
    let mut with = CriticalDestructionSimulator::new(
        buffered,
        CritRollTable::default(),
        fine_tuning(),
    );
    without.simulate(&ModifierSet::default());
    with.simulate(&ModifierSet::default());
    // The engine soaks three quarters of the rolls
    assert!(
        with.probability_of_destruction(AMMO) < without.probability_of_destruction(AMMO)
    );
}

#[test]
fn test_sole_occupant_destruction_converges_to_one() {
    // A single crittable item occupying all slots: as the strike count
    // grows, something eventually crits it
    let mut previous = 0.0;
    for structure_hp in [20.0, 60.0, 200.0] {
        let section = SectionProfile::new(
            "Left Arm",
            structure_hp,
            vec![ItemProfile::heat_sink(SINK)],
        );
        let mut simulator = CriticalDestructionSimulator::new(
            section,
            CritRollTable::default(),
            fine_tuning(),
        );
        simulator.simulate(&ModifierSet::default());
        let probability = simulator.probability_of_destruction(SINK);
        assert!(probability > previous);
        previous = probability;
    }
    // 20 strikes of 42% crit chance each
    assert!(previous > 0.999);
}

#[test]
fn test_structure_modifier_changes_strike_count() {
    let section = SectionProfile::new(
        "Right Torso",
        40.0,
        vec![ItemProfile::ammo_rack(AMMO)],
    );
    let mut simulator = CriticalDestructionSimulator::new(
        section,
        CritRollTable::default(),
        fine_tuning(),
    );
    simulator.simulate(&ModifierSet::default());
    let baseline = simulator.probability_of_destruction(AMMO);
    // +50% structure quirk: more strikes before the section fails, so more
    // chances to lose the ammo first
    let quirked = ModifierSet {
        structure_multiplier: 1.5,
    };
    simulator.simulate(&quirked);
    let reinforced = simulator.probability_of_destruction(AMMO);
    assert!(reinforced > baseline);
}

#[test]
fn test_banked_mass_sums_below_one() {
    // Shrinking the prune threshold only recovers more banked mass, and the
    // total stays bounded by one for this section
    let section = SectionProfile::new(
        "Left Torso",
        30.0,
        vec![
            ItemProfile::new(GYRO, "Gyro", 2, 30.0, 1),
            ItemProfile::ammo_rack(AMMO),
        ],
    );
    let mut total_coarse = 0.0;
    let mut total_fine = 0.0;
    for (threshold, total) in [(1e-3, &mut total_coarse), (1e-9, &mut total_fine)] {
        let tuning = SimulationTuning::new(10.0, 1e-6, threshold).unwrap();
        let mut simulator = CriticalDestructionSimulator::new(
            section.clone(),
            CritRollTable::default(),
            tuning,
        );
        simulator.simulate(&ModifierSet::default());
        *total = simulator.probability_of_destruction(GYRO)
            + simulator.probability_of_destruction(AMMO);
    }
    assert!(total_coarse <= total_fine + 1e-12);
    assert!(total_fine <= 1.0);
}

#[test]
fn test_full_destruction_mass_reaches_one_without_pruning() {
    // Guaranteed roll, sole item: every path banks exactly once
    let section = SectionProfile::new(
        "Head",
        20.0,
        vec![ItemProfile::heat_sink(SINK)],
    );
    let table = CritRollTable::new(0.0, vec![1.0]).unwrap();
    let tuning = SimulationTuning::new(10.0, 1e-6, 0.0).unwrap();
    let mut simulator = CriticalDestructionSimulator::new(section, table, tuning);
    simulator.simulate(&ModifierSet::default());
    assert!((simulator.probability_of_destruction(SINK) - 1.0).abs() < 1e-12);
}

#[test]
fn test_non_crittable_item_reports_zero() {
    let mut case = ItemProfile::new(GYRO, "Fixed Actuator", 2, 20.0, 1);
    case.crittable = false;
    let section = SectionProfile::new(
        "Right Arm",
        40.0,
        vec![case, ItemProfile::heat_sink(SINK)],
    );
    let mut simulator = CriticalDestructionSimulator::new(
        section,
        CritRollTable::default(),
        fine_tuning(),
    );
    simulator.simulate(&ModifierSet::default());
    assert_eq!(simulator.probability_of_destruction(GYRO), 0.0);
}

#[test]
fn test_crowded_section_spreads_destruction() {
    let section = SectionProfile::new(
        "Right Torso",
        50.0,
        vec![
            ItemProfile::engine(ENGINE, 3),
            ItemProfile::new(SINK, "Heat Sink", 1, 10.0, 2),
            ItemProfile::ammo_rack(AMMO),
            ItemProfile::new(GYRO, "Jump Jet", 1, 10.0, 1),
        ],
    );
    let mut simulator = CriticalDestructionSimulator::new(
        section,
        CritRollTable::default(),
        SimulationTuning::default(),
    );
    simulator.simulate(&ModifierSet::default());
    let sink = simulator.probability_of_destruction(SINK);
    let ammo = simulator.probability_of_destruction(AMMO);
    let jet = simulator.probability_of_destruction(GYRO);
    assert!(sink > 0.0 && ammo > 0.0 && jet > 0.0);
    // Equal footprint and health: the single-slot singles should agree
    assert!((ammo - jet).abs() < 1e-9);
    assert_eq!(simulator.probability_of_destruction(ENGINE), 0.0);
}
