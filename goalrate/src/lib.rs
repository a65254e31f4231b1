//! Implied probabilities from bookmaker odds and the Poisson scoring rates they imply.
//! Removes the overround from markets of mutually exclusive outcomes, and inverts a
//! total-goals probability into the rate of a Poisson goal-scoring process.

pub mod factorial;
pub mod market;
pub mod opt;
pub mod poisson;
pub mod probs;
pub mod rate;
pub mod timed;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
