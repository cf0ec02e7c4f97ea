//! Scalar utilities: inverse square root, power-of-two padding, angle
//! conversion and random ranges.

use rand::Rng;

/// Inverse square root.
///
/// Returns 0 (and logs a warning) for NaN, negative or zero input instead of
/// propagating NaN or infinity.
pub fn inv_sqrt(x: f32) -> f32 {
    if x.is_nan() || x <= 0.0 {
        log::warn!("inv_sqrt() called with an invalid value {}", x);
        return 0.0;
    }
    1.0 / x.sqrt()
}

/// Smallest power of two that is greater than or equal to `n`.
///
/// Used to pad texture dimensions. Returns 1 for `n <= 1` and saturates at
/// `1 << 31` when the next power of two does not fit in a `u32`.
pub fn round_up_to_next_power_of_two(n: u32) -> u32 {
    n.max(1).checked_next_power_of_two().unwrap_or_else(|| {
        log::warn!("No u32 power of two at or above {}, saturating", n);
        1 << 31
    })
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees / 360.0 * std::f32::consts::TAU
}

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians / std::f32::consts::TAU * 360.0
}

/// Uniform value between `min` and `max`; returns `min` when the range is empty
pub fn random_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    (max - min) * rng.random::<f32>() + min
}

/// Greatest value, or `None` for an empty slice
pub fn find_max(values: &[f32]) -> Option<f32> {
    values.iter().copied().reduce(f32::max)
}

/// Smallest value, or `None` for an empty slice
pub fn find_min(values: &[f32]) -> Option<f32> {
    values.iter().copied().reduce(f32::min)
}
