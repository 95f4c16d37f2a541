//! Critical-hit destruction simulation
//!
//! Given a structural section absorbing a sequence of fixed-size reference
//! strikes, computes for each installed item the probability that incidental
//! critical-hit damage destroys it before the section's own structure fails.

pub mod constants;
pub mod section;
pub mod simulator;
pub mod table;
pub mod tuning;

mod state;

pub use section::{ItemId, ItemProfile, ModifierSet, SectionProfile};
pub use simulator::CriticalDestructionSimulator;
pub use table::CritRollTable;
pub use tuning::SimulationTuning;
