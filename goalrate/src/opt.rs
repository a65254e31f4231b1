//! Derivative-free, one-dimensional search.

use std::ops::RangeInclusive;

/// `points` values evenly spaced over `bounds`, both ends included. Each value is `start + index *
/// step`, with the step computed once. The last value is pinned to the upper bound, so it is exact.
pub fn linspace(bounds: RangeInclusive<f64>, points: usize) -> Vec<f64> {
    let (start, end) = (*bounds.start(), *bounds.end());
    match points {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            let mut values = (0..points)
                .map(|index| start + index as f64 * step)
                .collect::<Vec<_>>();
            values[points - 1] = end;
            values
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSearchOutcome {
    pub index: usize,
    pub optimal_value: f64,
    pub optimal_residual: f64,
}

/// Evaluates `loss_f` at every point of `grid` and returns the point with the smallest residual.
/// Ties go to the earliest point. `loss_f` receives both the index and the value of each point, so
/// that callers may look up precomputed quantities by index.
///
/// Residuals that are `NaN` never win; if none is comparable, the first point is returned with
/// its (`NaN`) residual.
pub fn grid_search(grid: &[f64], mut loss_f: impl FnMut(usize, f64) -> f64) -> GridSearchOutcome {
    assert!(!grid.is_empty(), "search grid cannot be empty");

    let mut optimal_index = 0;
    let mut optimal_residual = loss_f(0, grid[0]);
    for (index, &value) in grid.iter().enumerate().skip(1) {
        let residual = loss_f(index, value);
        if residual < optimal_residual || optimal_residual.is_nan() && !residual.is_nan() {
            optimal_index = index;
            optimal_residual = residual;
        }
    }
    GridSearchOutcome {
        index: optimal_index,
        optimal_value: grid[optimal_index],
        optimal_residual,
    }
}
