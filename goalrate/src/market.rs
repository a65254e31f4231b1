//! Removal of the bookmaker's margin from a market of mutually exclusive outcomes.

use crate::probs::SliceExt;

/// A market of mutually exclusive outcomes, its decimal prices and the probabilities implied
/// once the overround has been removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub probs: Vec<f64>,
    pub prices: Vec<f64>,
    pub overround: f64,
}
impl Market {
    /// Fits probabilities to `prices` multiplicatively: each implied probability `1 / price` is
    /// scaled by the same factor so that the probabilities add up to `fair_sum`. The overround is
    /// the ratio of the implied booksum to `fair_sum`.
    ///
    /// Prices are not validated; a zero price produces non-finite probabilities.
    pub fn fit(prices: Vec<f64>, fair_sum: f64) -> Self {
        let mut probs = prices.invert();
        let overround = probs.normalise(fair_sum) / fair_sum;
        Self {
            probs,
            prices,
            overround,
        }
    }

    /// The fraction of stakes returned to bettors across the book, i.e., `1 / overround`.
    pub fn payout_rate(&self) -> f64 {
        1.0 / self.overround
    }

    /// The margin-free price of each outcome.
    pub fn fair_prices(&self) -> Vec<f64> {
        self.probs.invert()
    }
}
