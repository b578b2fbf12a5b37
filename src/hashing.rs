//! Index functions shared by the hash engines.

/// Golden-ratio multiplier `(sqrt(5) - 1) / 2`.
pub const GOLDEN_RATIO_FRAC: f64 = 0.618_033_988_749_894_9;

/// Multiplicative (Fibonacci) hashing: `floor(m * frac(key * A))`.
#[inline]
pub fn multiplicative_index(key: u32, m: usize) -> usize {
    debug_assert!(m > 0);
    let frac = (f64::from(key) * GOLDEN_RATIO_FRAC).fract();
    // frac < 1, but m * frac can still round up to m.
    ((m as f64 * frac) as usize).min(m - 1)
}

/// Linear probing: `(key + i) mod m`.
#[inline]
pub fn linear_probe_index(key: u32, i: usize, m: usize) -> usize {
    debug_assert!(m > 0);
    (key as usize % m + i % m) % m
}
