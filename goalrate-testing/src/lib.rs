//! Testing helpers shared across the workspace.

use assert_float_eq::*;

pub mod fixtures;

/// Asserts that two slices agree element-wise to within `distance` ULPs.
pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_f64_near!(expected, actual, distance);
        }
    }
}

/// Asserts that two slices agree element-wise to within a relative `epsilon`.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that the elements of `probs` add up to `expected` within an absolute `tolerance`.
pub fn assert_booksum(expected: f64, probs: &[f64], tolerance: f64) {
    let sum: f64 = probs.iter().sum();
    assert!(
        (sum - expected).abs() <= tolerance,
        "booksum {sum} of {probs:?} is not within {tolerance} of {expected}"
    );
}
