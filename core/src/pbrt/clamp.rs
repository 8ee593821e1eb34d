//! Clamp

use num_traits::Num;

/// Clamps a value x to [min, max]. Works for any `PartialOrd` number, unlike
/// `f32::clamp` which panics when `min > max` and needs `Ord` for integers.
///
/// * `x`   - The number to clamp.
/// * `min` - Minimum value.
/// * `max` - Maximum value.
#[inline(always)]
pub fn clamp<T>(x: T, min: T, max: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_and_outside_interval() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp(7, 1, 3), 3);
    }

    #[test]
    fn nan_passes_through() {
        assert!(clamp(f32::NAN, 0.0, 1.0).is_nan());
    }
}
