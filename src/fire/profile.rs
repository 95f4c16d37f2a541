//! Fire-control parameters for a jam-capable weapon
//!
//! The profile is caller-supplied (the data-file parser produces it) and is
//! never mutated here. All durations are in seconds.

use serde::{Deserialize, Serialize};

/// Immutable fire-control parameters of a weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponFireProfile {
    /// Time between the end of one firing cycle and the start of the next
    pub cooldown: f64,
    /// Spin-up time before the weapon starts firing from cold
    pub ramp_up_time: f64,
    /// Spin-down time after the trigger is released
    pub ramp_down_time: f64,
    /// Probability that a firing period ends in a jam
    pub jam_chance: f64,
    /// Time the weapon is blocked while a jam clears
    pub jam_time: f64,
    /// Spin-up time needed after a jam before the weapon can jam again
    pub jam_ramp_up_time: f64,
    /// Spin-down time after a jam
    pub jam_ramp_down_time: f64,
    /// Shots delivered per firing cycle
    pub shots_per_period: f64,
    /// Duration of one raw firing period
    pub raw_firing_period: f64,
}

impl WeaponFireProfile {
    /// True when the weapon has working jam mechanics
    pub fn is_jam_capable(&self) -> bool {
        self.jam_chance > 0.0 && self.jam_time > 0.0
    }

    /// Jam-free interval after a jam clears, during which the weapon is
    /// already firing but has not yet reached jam-capable spin
    pub fn jam_free_grace(&self) -> f64 {
        (self.jam_ramp_up_time - self.ramp_up_time).max(0.0)
    }

    /// Full duration of one jam episode: clearing the jam, the jam-free
    /// grace, and the one firing period the jam interrupted
    pub fn jam_episode_duration(&self) -> f64 {
        self.jam_time + self.jam_free_grace() + self.raw_firing_period
    }

    /// Sustained fire rate in shots per second
    pub fn sustained_rate(&self) -> f64 {
        self.shots_per_period / self.raw_firing_period
    }

    /// Shots delivered by one complete jam episode (grace plus the
    /// interrupted period, at the sustained rate)
    pub fn shots_per_episode(&self) -> f64 {
        self.sustained_rate() * (self.jam_free_grace() + self.raw_firing_period)
    }

    /// Example profile: rotary cannon with a long spin-up after jams
    pub fn rotary_cannon() -> Self {
        Self {
            cooldown: 0.11,
            ramp_up_time: 0.75,
            ramp_down_time: 2.0,
            jam_chance: 0.04,
            jam_time: 5.0,
            jam_ramp_up_time: 1.0,
            jam_ramp_down_time: 2.0,
            shots_per_period: 1.0,
            raw_firing_period: 0.11,
        }
    }

    /// Example profile: double-tap autocannon that jams on the extra shot
    pub fn double_tap_cannon() -> Self {
        Self {
            cooldown: 1.66,
            ramp_up_time: 0.0,
            ramp_down_time: 0.0,
            jam_chance: 0.17,
            jam_time: 5.0,
            jam_ramp_up_time: 0.0,
            jam_ramp_down_time: 0.0,
            shots_per_period: 2.0,
            raw_firing_period: 1.66,
        }
    }
}
