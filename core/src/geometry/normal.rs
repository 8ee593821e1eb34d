//! 3-D normals

#![allow(dead_code)]
use super::common::*;
use super::{abs, Float, Vector3};
use num_traits::{Num, Zero};
use std::ops::{Add, Div, Mul, Neg};

/// A 3-D normal containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normal3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D normal containing `Float` values.
pub type Normal3f = Normal3<Float>;

impl Normal3f {
    /// Zero normal.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

impl<T: Num> Normal3<T> {
    /// Creates a new 3-D normal.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero normal.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the square of the normal's length.
    pub fn length_squared(&self) -> T
    where
        T: Mul<Output = T> + Add<Output = T> + Copy,
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the normal's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the unit normal.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self / self.length()
    }

    /// Returns a new normal containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd + Copy,
    {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with another normal.
    ///
    /// * `other` - The other normal.
    fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Copy> Cross<Vector3<T>> for Normal3<T> {
    type Output = Vector3<T>;

    /// Returns the cross product with a vector.
    ///
    /// * `other` - The vector.
    fn cross(&self, other: &Vector3<T>) -> Self::Output {
        Vector3::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Vector3<T>> for Normal3<T> {}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Normal3<T>> for Normal3<T> {}

impl<T: Num + Copy> Mul<T> for Normal3<T> {
    type Output = Self;

    /// Scale the normal.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl<T: Num + Copy> Div<T> for Normal3<T> {
    type Output = Self;

    /// Scale the normal by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: T) -> Self::Output {
        debug_assert!(!f.is_zero());

        let inv = T::one() / f;
        Self::new(inv * self.x, inv * self.y, inv * self.z)
    }
}

impl<T: Num + Neg<Output = T>> Neg for Normal3<T> {
    type Output = Self;

    /// Flip the normal's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T> From<Vector3<T>> for Normal3<T> {
    /// Convert a 3-D vector to a 3-D normal.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
