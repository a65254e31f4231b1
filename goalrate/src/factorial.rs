//! Factorials for the small event counts that appear in goal distributions.

/// The largest `n` for which `n!` fits in a `u128`.
pub const MAX_N: u8 = 34;

pub trait Factorial {
    fn get(&self, n: u8) -> u128;

    #[inline]
    fn get_f64(&self, n: u8) -> f64 {
        self.get(n) as f64
    }
}

/// Computes each factorial on demand.
#[derive(Default)]
pub struct Calculator;

impl Factorial for Calculator {
    #[inline]
    fn get(&self, n: u8) -> u128 {
        assert!(n <= MAX_N, "{n}! overflows");
        (2..=n as u128).product()
    }
}

const ENTRIES: usize = MAX_N as usize + 1;

/// Precomputes every representable factorial up front; preferable when the same
/// factorials are needed for many rows.
pub struct Lookup {
    entries: [u128; ENTRIES],
}
impl Factorial for Lookup {
    #[inline]
    fn get(&self, n: u8) -> u128 {
        self.entries[n as usize]
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut entries = [1u128; ENTRIES];
        for n in 2..ENTRIES {
            entries[n] = n as u128 * entries[n - 1];
        }
        Self { entries }
    }
}
