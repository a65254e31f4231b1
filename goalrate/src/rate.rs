//! Inversion of a total-goals probability into the Poisson scoring rate that implies it.
//!
//! Given `p`, the probability that a match produces at most `goals` goals, the rate `mu` is
//! the candidate on a fixed grid whose Poisson CDF at `goals` lies nearest to `p`. The result is
//! quantised to the grid; no interpolation is performed.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::factorial::{self, Lookup};
use crate::opt;
use crate::poisson;

pub const DEFAULT_BOUNDS: RangeInclusive<f64> = 0.0..=10.0;
pub const DEFAULT_POINTS: usize = 1_000;

/// At most two goals, i.e., the "under 2.5" side of the standard total-goals line.
pub const DEFAULT_GOALS: u8 = 2;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidGrid {
    #[error("grid requires at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("grid bounds {0:?} must be finite, non-negative and ascending")]
    Bounds(RangeInclusive<f64>),

    #[error("at most 34 goals are supported, got {0}")]
    Goals(u8),
}

/// Candidate rates paired with their Poisson CDF values, computed once and reused for every
/// inversion.
#[derive(Debug, Clone)]
pub struct RateGrid {
    goals: u8,
    rates: Vec<f64>,
    cdfs: Vec<f64>,
}
impl RateGrid {
    pub fn new(bounds: RangeInclusive<f64>, points: usize, goals: u8) -> Result<Self, InvalidGrid> {
        if points < 2 {
            return Err(InvalidGrid::TooFewPoints(points));
        }
        let (start, end) = (*bounds.start(), *bounds.end());
        if !start.is_finite() || !end.is_finite() || start < 0.0 || start >= end {
            return Err(InvalidGrid::Bounds(bounds));
        }
        if goals > factorial::MAX_N {
            return Err(InvalidGrid::Goals(goals));
        }

        Ok(Self::build(bounds, points, goals))
    }

    fn build(bounds: RangeInclusive<f64>, points: usize, goals: u8) -> Self {
        let factorial = Lookup::default();
        let rates = opt::linspace(bounds, points);
        let cdfs = rates
            .iter()
            .map(|&rate| poisson::cdf(goals, rate, &factorial))
            .collect();
        Self { goals, rates, cdfs }
    }

    /// The rate whose probability of at most [`goals`](Self::goals) goals is nearest to `prob`.
    /// Where several candidates are equally near, the smallest rate is returned.
    pub fn rate_for(&self, prob: f64) -> f64 {
        opt::grid_search(&self.rates, |index, _| (self.cdfs[index] - prob).abs()).optimal_value
    }

    pub fn goals(&self) -> u8 {
        self.goals
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    pub fn cdfs(&self) -> &[f64] {
        &self.cdfs
    }
}

impl Default for RateGrid {
    /// 1,000 rates spanning 0 to 10 goals inclusive, inverted at 2 goals.
    fn default() -> Self {
        Self::build(DEFAULT_BOUNDS, DEFAULT_POINTS, DEFAULT_GOALS)
    }
}

/// The scoring rate implied by `under_prob`, the probability of a match producing fewer than 2.5
/// goals, searched over the default grid.
///
/// Builds the grid on each call; prefer holding a [`RateGrid`] when inverting many probabilities.
pub fn mu_from_prob(under_prob: f64) -> f64 {
    RateGrid::default().rate_for(under_prob)
}
