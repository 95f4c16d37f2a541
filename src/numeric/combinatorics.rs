//! Exact "n choose k" and binomial probability masses
//!
//! A composition over a long time window can involve thousands of trials;
//! `C(n, k)` overflows u128 and `p^k` underflows f64 long before that, so
//! everything here runs in arbitrary precision and is converted to f64 only
//! at the very end.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

/// Exact binomial coefficient `C(n, k)`
///
/// Uses the multiplicative row walk, dividing at every step so intermediate
/// values stay at the size of the result.
pub fn binomial(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 0..k {
        result = result * BigUint::from(n - k + i + 1) / BigUint::from(i + 1);
    }
    result
}

/// Exact probability of `successes` successes in `trials` independent trials
///
/// Computes `C(trials, successes) * p^successes * (1-p)^(trials-successes)`
/// with `p` lifted to the exact rational value of its f64 representation.
/// Returns zero for a `success_chance` outside [0, 1] representation (NaN).
pub fn exact_binomial_mass(trials: u64, successes: u64, success_chance: f64) -> BigRational {
    if successes > trials {
        return BigRational::zero();
    }
    let p = match BigRational::from_float(success_chance) {
        Some(value) => value,
        None => return BigRational::zero(),
    };
    let q = BigRational::one() - &p;
    let coefficient = BigRational::from_integer(BigInt::from(binomial(trials, successes)));
    coefficient * p.pow(successes as i32) * q.pow((trials - successes) as i32)
}

/// Convert a rational to f64 without overflowing through the integer parts
///
/// Both sides of the fraction are shifted down to at most 64 significant bits
/// before dividing, then the dropped scale is restored in the exponent.
pub fn ratio_to_f64(value: &BigRational) -> f64 {
    if value.numer().is_zero() {
        return 0.0;
    }
    let numer_bits = value.numer().bits() as i64;
    let denom_bits = value.denom().bits() as i64;
    let drop_numer = (numer_bits - 64).max(0);
    let drop_denom = (denom_bits - 64).max(0);
    let numer = (value.numer() >> drop_numer as usize).to_f64().unwrap_or(0.0);
    let denom = (value.denom() >> drop_denom as usize).to_f64().unwrap_or(1.0);
    (numer / denom) * 2f64.powi((drop_numer - drop_denom) as i32)
}
