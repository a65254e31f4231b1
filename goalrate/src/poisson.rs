//! The Poisson distribution of goal counts.

use crate::factorial::Factorial;

/// Probability of exactly `k` events given a mean rate of `lambda`.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial.get_f64(k)
}

/// Probability of at most `k` events given a mean rate of `lambda`.
///
/// Accumulates the terms `lambda^i / i!` incrementally and applies `e^-lambda` once, so a zero rate
/// yields exactly 1.
#[inline]
pub fn cdf(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    let sum = (0..=k)
        .map(|i| lambda.powi(i as i32) / factorial.get_f64(i))
        .sum::<f64>();
    f64::exp(-lambda) * sum
}
