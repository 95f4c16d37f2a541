//! Expected shot count for a jam-capable weapon over a time window
//!
//! The window is modeled as a mix of normal firing periods and jam episodes.
//! For every candidate count of normal periods the number of whole jam
//! episodes is forced by the leftover time, and three sub-cases cover how the
//! window can end. Composition probabilities are exact binomial masses
//! computed in rational arithmetic because trial counts and exponents can be
//! extreme.

use crate::core::{MechlabError, Result};
use crate::fire::constants::{EXACT_FILL_EPSILON, MASS_TOLERANCE};
use crate::fire::profile::WeaponFireProfile;
use crate::numeric::{exact_binomial_mass, ratio_to_f64, MagnitudeSum};
use crate::signal::{PulseTrainSignal, Signal, TruncatedSignal};

/// Expected-shots estimator for one jam-capable weapon
///
/// Holds no state beyond its immutable parameters; every query is a pure
/// function of the duration.
#[derive(Debug, Clone)]
pub struct BurstFireEstimator {
    profile: WeaponFireProfile,
    damage_per_shot: f64,
    range_factor: f64,
    spin_up_shots: TruncatedSignal<PulseTrainSignal>,
}

impl BurstFireEstimator {
    /// Build an estimator for a jam-capable weapon
    ///
    /// Fails for a weapon without working jam mechanics, a jam chance above
    /// 1, or a negative range factor. Nothing is clamped silently.
    pub fn new(
        profile: WeaponFireProfile,
        damage_per_shot: f64,
        range_factor: f64,
    ) -> Result<Self> {
        if !profile.is_jam_capable() {
            return Err(MechlabError::NotJamCapable(format!(
                "jam chance {}, jam time {}",
                profile.jam_chance, profile.jam_time
            )));
        }
        if profile.jam_chance > 1.0 {
            return Err(MechlabError::NotJamCapable(format!(
                "jam chance {} exceeds 1",
                profile.jam_chance
            )));
        }
        if range_factor < 0.0 {
            return Err(MechlabError::NegativeRangeFactor(range_factor));
        }
        let train = PulseTrainSignal::new(profile.raw_firing_period, profile.shots_per_period)?;
        let spin_up_shots = TruncatedSignal::new(train, profile.jam_free_grace());
        Ok(Self {
            profile,
            damage_per_shot,
            range_factor,
            spin_up_shots,
        })
    }

    /// Expected number of shots fired during `duration` seconds
    ///
    /// Non-negative and non-decreasing in the duration. The jam-free
    /// spin-up prefix fires deterministically; the rest of the window is
    /// modeled stochastically.
    pub fn expected_shots(&self, duration: f64) -> f64 {
        debug_assert!(duration >= 0.0);
        let duration = duration.max(0.0);
        let grace = self.profile.jam_free_grace();
        let deterministic = if grace > 0.0 {
            self.spin_up_shots.integrate_from_zero_to(duration)
        } else {
            0.0
        };
        let window = duration - grace;
        if window <= 0.0 {
            // The jam-free prefix consumed the whole window
            return deterministic;
        }

        let (weighted_shots, mass) = self.stochastic_expectation(window);
        if mass <= 0.0 {
            return deterministic;
        }
        let expected = if (mass - 1.0).abs() > MASS_TOLERANCE {
            tracing::debug!(
                "Renormalizing expected shots: mass {} over window {}",
                mass,
                window
            );
            weighted_shots / mass
        } else {
            weighted_shots
        };
        deterministic + expected
    }

    /// Enumerate jam/normal compositions of `window` and accumulate the
    /// probability-weighted shot count and the total probability mass
    fn stochastic_expectation(&self, window: f64) -> (f64, f64) {
        let period = self.profile.raw_firing_period;
        let shots = self.profile.shots_per_period;
        let rate = self.profile.sustained_rate();
        let episode = self.profile.jam_episode_duration();
        let episode_shots = self.profile.shots_per_episode();
        let jam_chance = self.profile.jam_chance;
        let clear_chance = 1.0 - jam_chance;
        let jam_time = self.profile.jam_time;
        let grace = self.profile.jam_free_grace();

        let mut mass_terms = MagnitudeSum::new();
        let mut shot_terms = MagnitudeSum::new();

        let max_normals = (window / period).floor() as u64;
        for normals in (0..=max_normals).rev() {
            let leftover = (window - normals as f64 * period).max(0.0);
            let jams = (leftover / episode).floor() as u64;
            let residual = (leftover - jams as f64 * episode).max(0.0);
            let trials = normals + jams;
            let base_mass = ratio_to_f64(&exact_binomial_mass(trials, jams, jam_chance));
            let base_shots = normals as f64 * shots + jams as f64 * episode_shots;

            if residual <= EXACT_FILL_EPSILON {
                // (i) the composition exactly fills the window
                mass_terms.push(base_mass);
                shot_terms.push(base_mass * base_shots);
                continue;
            }

            // (ii) the window ends inside one further jam episode; its
            // jam-free contribution is scaled by the time past the jam clear
            let fired = (residual - jam_time).clamp(0.0, grace + period);
            let jam_mass = base_mass * jam_chance;
            mass_terms.push(jam_mass);
            shot_terms.push(jam_mass * (base_shots + rate * fired));

            // (iii) the window ends inside one further normal period; only
            // possible while the residual is below a whole period, since a
            // completed period belongs to the next composition up
            if residual < period {
                let normal_mass = base_mass * clear_chance;
                mass_terms.push(normal_mass);
                shot_terms.push(normal_mass * (base_shots + rate * residual));
            }
        }

        let mass = mass_terms.total();
        let weighted_shots = shot_terms.total();
        tracing::trace!(
            "{} compositions over window {}: mass {}",
            max_normals + 1,
            window,
            mass
        );
        (weighted_shots, mass)
    }
}

impl Signal for BurstFireEstimator {
    /// Expected damage over the window: shot count times per-shot damage
    /// times the range effectiveness factor
    fn integrate_from_zero_to(&self, t: f64) -> f64 {
        self.expected_shots(t) * self.damage_per_shot * self.range_factor
    }
}
