//! RGB Spectrum.

#![allow(dead_code)]

use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Sub, SubAssign};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents a linear colour with a weighted sum of red, green
/// and blue components.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self {
        c: [0.0; RGB_SAMPLES],
    };

    /// White.
    pub const ONE: Self = Self {
        c: [1.0; RGB_SAMPLES],
    };

    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        let ret = Self {
            c: [v; RGB_SAMPLES],
        };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Create a new `RGBSpectrum` from red, green and blue components.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        let ret = Self { c: [r, g, b] };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Returns the stored samples.
    pub fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Convert the SPD to RGB cooefficients.
    pub fn to_rgb(&self) -> [Float; 3] {
        self.c
    }

    /// Returns true if all sample values are zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any sample value is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns true if every sample value is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.c.iter().all(|v| v.is_finite())
    }

    /// Returns the largest sample value.
    pub fn max_component_value(&self) -> Float {
        self.c.iter().fold(-INFINITY, |m, &v| max(m, v))
    }

    /// Returns the y-coefficient of XYZ colour.
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Takes the square root of all sample values.
    pub fn sqrt(&self) -> Self {
        Self {
            c: [self.c[0].sqrt(), self.c[1].sqrt(), self.c[2].sqrt()],
        }
    }

    /// Clamps the sample values to [low, high].
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: [
                clamp(self.c[0], low, high),
                clamp(self.c[1], low, high),
                clamp(self.c[2], low, high),
            ],
        }
    }

    /// Combine sample values pairwise with another spectrum.
    fn zip_with<F: Fn(Float, Float) -> Float>(&self, other: &Self, f: F) -> Self {
        Self {
            c: [
                f(self.c[0], other.c[0]),
                f(self.c[1], other.c[1]),
                f(self.c[2], other.c[2]),
            ],
        }
    }
}

impl Default for RGBSpectrum {
    /// Return a black `RGBSpectrum`.
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[Float; 3]> for RGBSpectrum {
    /// Create a new `RGBSpectrum` from RGB values.
    ///
    /// * `rgb` - RGB values.
    fn from(rgb: [Float; 3]) -> Self {
        Self::from_rgb(rgb[0], rgb[1], rgb[2])
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn add(self, other: Self) -> Self::Output {
        self.zip_with(&other, |a, b| a + b)
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn sub(self, other: Self) -> Self::Output {
        self.zip_with(&other, |a, b| a - b)
    }
}

impl SubAssign for RGBSpectrum {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn mul(self, other: Self) -> Self::Output {
        self.zip_with(&other, |a, b| a * b)
    }
}

impl MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the sample values with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self {
            c: [self.c[0] * f, self.c[1] * f, self.c[2] * f],
        }
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the sample values of an `RGBSpectrum`.
    ///
    /// * `s` - Sample values.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl Div for RGBSpectrum {
    type Output = Self;

    /// Divides the corresponding sample values by those of another
    /// `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn div(self, other: Self) -> Self::Output {
        self.zip_with(&other, |a, b| a / b)
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the sample values by 1/f.
    ///
    /// * `f` - Scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

impl DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Returns the sample value at an index.
    ///
    /// * `i` - Index in [0, 2].
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constants() {
        assert!(RGBSpectrum::ZERO.is_black());
        assert!(!RGBSpectrum::ONE.is_black());
        assert_eq!(RGBSpectrum::default(), RGBSpectrum::ZERO);
        assert_eq!(RGBSpectrum::new(1.0), RGBSpectrum::ONE);
    }

    #[test]
    fn finite_checks() {
        assert!(RGBSpectrum::from_rgb(1.0, 2.0, 3.0).is_finite());
        assert!(!RGBSpectrum::from_rgb(1.0, INFINITY, 3.0).is_finite());
        assert_eq!(RGBSpectrum::from_rgb(1.0, 5.0, 3.0).max_component_value(), 5.0);
    }

    #[test]
    fn y_of_white_is_one() {
        assert!((RGBSpectrum::ONE.y() - 1.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn scale_commutes(r in 0.0..10.0f32, g in 0.0..10.0f32, b in 0.0..10.0f32, f in -10.0..10.0f32) {
            let s = RGBSpectrum::from_rgb(r, g, b);
            prop_assert_eq!(s * f, f * s);
            prop_assert_eq!((s * f)[1], g * f);
        }

        #[test]
        fn add_sub_mul_component_wise(r in 0.0..10.0f32, g in 0.0..10.0f32, b in 0.0..10.0f32) {
            let s = RGBSpectrum::from_rgb(r, g, b);
            let t = RGBSpectrum::from_rgb(b, r, g);
            prop_assert_eq!((s + t).to_rgb(), [r + b, g + r, b + g]);
            prop_assert_eq!((s - t).to_rgb(), [r - b, g - r, b - g]);
            prop_assert_eq!((s * t).to_rgb(), [r * b, g * r, b * g]);
        }
    }
}
