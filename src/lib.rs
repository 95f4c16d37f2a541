//! MechLab combat statistics core
//!
//! Analytic primitives consumed by the build-comparison tool: expected shot
//! counts for weapons that can randomly jam and recover, and per-item
//! critical destruction probabilities for structural sections. Pure
//! computation; the UI, parser and persistence live elsewhere.

pub mod core;
pub mod crits;
pub mod fire;
pub mod numeric;
pub mod signal;
