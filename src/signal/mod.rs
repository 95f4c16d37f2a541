//! Time-indexed signals, accessed only through their definite integral
//!
//! Everything downstream (burst-fire estimation, damage-over-time curves)
//! consumes a signal as "how much accumulated between 0 and t", never as a
//! pointwise sample. All variants defined here are non-decreasing in t.

use crate::core::{MechlabError, Result};

/// A one-dimensional time-indexed quantity
///
/// Implementations are stateless after construction; `integrate_from_zero_to`
/// is a pure function of `t`.
pub trait Signal {
    /// Definite integral of the signal from 0 to `t`
    ///
    /// The contract requires `t >= 0`.
    fn integrate_from_zero_to(&self, t: f64) -> f64;
}

/// Constant-rate signal: integrates to `rate * t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSignal {
    rate: f64,
}

impl ConstantSignal {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Signal for ConstantSignal {
    fn integrate_from_zero_to(&self, t: f64) -> f64 {
        debug_assert!(t >= 0.0);
        self.rate * t
    }
}

/// Impulse train: `amplitude` delivered at t = 0, period, 2*period, ...
///
/// The impulse at t = 0 is included, so the integral over any window is
/// `floor(t / period + 1) * amplitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseTrainSignal {
    period: f64,
    amplitude: f64,
}

impl PulseTrainSignal {
    /// Create a pulse train. Fails immediately for a non-positive period.
    pub fn new(period: f64, amplitude: f64) -> Result<Self> {
        if period <= 0.0 {
            return Err(MechlabError::NonPositivePeriod(period));
        }
        Ok(Self { period, amplitude })
    }
}

impl Signal for PulseTrainSignal {
    fn integrate_from_zero_to(&self, t: f64) -> f64 {
        debug_assert!(t >= 0.0);
        (t / self.period + 1.0).floor() * self.amplitude
    }
}

/// Freezes accumulation of an inner signal past a cutoff time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedSignal<S> {
    inner: S,
    cutoff: f64,
}

impl<S: Signal> TruncatedSignal<S> {
    pub fn new(inner: S, cutoff: f64) -> Self {
        Self { inner, cutoff }
    }
}

impl<S: Signal> Signal for TruncatedSignal<S> {
    fn integrate_from_zero_to(&self, t: f64) -> f64 {
        self.inner.integrate_from_zero_to(t.min(self.cutoff))
    }
}
