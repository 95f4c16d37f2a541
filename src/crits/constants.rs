//! Critical-hit simulation constants - the editor's canonical values
//!
//! The roll table numbers mirror the combat rules the parser feeds in; they
//! live here so tests and default-constructed simulators agree with the rest
//! of the tool.

/// Damage of one reference strike (one simulated attack event)
pub const REFERENCE_STRIKE_DAMAGE: f64 = 10.0;

/// Slack when comparing grouped item health against one reference-damage
/// increment
pub const HEALTH_TOLERANCE: f64 = 1e-6;

/// Branches whose cumulative probability falls below this are dropped
pub const DEFAULT_PRUNE_THRESHOLD: f64 = 1e-6;

/// Chance that a strike causes no critical rolls at all
pub const STANDARD_MISS_CHANCE: f64 = 0.58;

/// Chance of exactly 1, 2 and 3 critical rolls per strike
pub const STANDARD_ROLL_CHANCES: [f64; 3] = [0.25, 0.14, 0.03];
