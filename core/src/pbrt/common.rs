//! Common

use super::clamp::*;
use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 1/2*PI (1/2π)
pub const INV_TWO_PI: Float = 1.0 / TWO_PI;

/// Largest `Float` strictly below 1, used to keep remapped samples in [0, 1).
pub const ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1"); // 0.99999994

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Return the cosine of an angle.
///
/// * `theta` - The angle in radians.
#[inline(always)]
pub fn cos(theta: Float) -> Float {
    theta.cos()
}

/// Return the sine of an angle.
///
/// * `theta` - The angle in radians.
#[inline(always)]
pub fn sin(theta: Float) -> Float {
    theta.sin()
}

/// Return the tangent of an angle.
///
/// * `theta` - The angle in radians.
#[inline(always)]
pub fn tan(theta: Float) -> Float {
    theta.tan()
}

/// Return the arccosine of a value clamped to [-1, 1].
///
/// * `x` - The cosine value.
#[inline(always)]
pub fn acos(x: Float) -> Float {
    clamp(x, -1.0, 1.0).acos()
}

/// Computes the arctangent of a number. Return value is in radians in the range
/// [-π/2, π/2];
///
/// * `theta` - The angle in radians.
#[inline(always)]
pub fn atan(theta: Float) -> Float {
    theta.atan()
}

/// Returns `v^5`.
///
/// * `v` - The value.
#[inline(always)]
pub fn pow5<T: Mul<T, Output = T> + Copy>(v: T) -> T {
    (v * v) * (v * v) * v
}

/// Returns the error function for a given floating point value.
///
/// * `x` - The floating point value.
#[inline(always)]
pub fn erf(x: Float) -> Float {
    // constants
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    // Save the sign of x
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = abs(x);

    // A&S formula 7.1.26.
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// Returns the inverse of the error function for a given floating point value.
///
/// * `x` - The floating point value.
#[inline(always)]
pub fn erf_inv(x: Float) -> Float {
    let x = clamp(x, -0.99999, 0.99999);
    let mut w = -((1.0 - x) * (1.0 + x)).ln();
    if w < 5.0 {
        w -= 2.5;

        let mut p = 2.81022636e-08;
        p = 3.43273939e-07 + p * w;
        p = -3.5233877e-06 + p * w;
        p = -4.39150654e-06 + p * w;
        p = 0.00021858087 + p * w;
        p = -0.00125372503 + p * w;
        p = -0.00417768164 + p * w;
        p = 0.246640727 + p * w;
        p = 1.50140941 + p * w;
        p * x
    } else {
        w = w.sqrt() - 3.0;

        let mut p = -0.000200214257;
        p = 0.000100950558 + p * w;
        p = 0.00134934322 + p * w;
        p = -0.00367342844 + p * w;
        p = 0.00573950773 + p * w;
        p = -0.0076224613 + p * w;
        p = 0.00943887047 + p * w;
        p = 1.00167406 + p * w;
        p = 2.83297682 + p * w;
        p * x
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn one_minus_epsilon_is_below_one() {
        assert!(ONE_MINUS_EPSILON < 1.0);
        assert!(ONE_MINUS_EPSILON > 0.9999999);
    }

    #[test]
    fn erf_known_values() {
        assert!(approx_eq!(f32, erf(0.0), 0.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, erf(1.0), 0.842_700_8, epsilon = 1e-5));
        assert!(approx_eq!(f32, erf(-1.0), -0.842_700_8, epsilon = 1e-5));
        assert!(approx_eq!(f32, erf(3.0), 0.999_977_9, epsilon = 1e-5));
    }

    #[test]
    fn pow5_matches_powi() {
        assert_eq!(pow5(2.0), 32.0);
        assert!(approx_eq!(f32, pow5(0.3), (0.3 as Float).powi(5), ulps = 4));
    }

    proptest! {
        #[test]
        fn erf_inv_inverts_erf(x in -0.99..0.99f32) {
            let y = erf(erf_inv(x));
            prop_assert!(approx_eq!(f32, y, x, epsilon = 1e-3));
        }

        #[test]
        fn lerp_endpoints(a in -100.0..100.0f32, b in -100.0..100.0f32) {
            prop_assert_eq!(lerp(0.0, a, b), a);
            prop_assert!(approx_eq!(f32, lerp(1.0, a, b), b, epsilon = 1e-4));
        }

        #[test]
        fn min_max_abs(a in -100.0..100.0f32, b in -100.0..100.0f32) {
            prop_assert_eq!(min(a, b), a.min(b));
            prop_assert_eq!(max(a, b), a.max(b));
            prop_assert_eq!(abs(a), a.abs());
        }
    }
}
