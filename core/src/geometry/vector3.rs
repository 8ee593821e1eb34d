//! 3-D Vectors

#![allow(dead_code)]
use super::common::*;
use super::{abs, Float, Normal3};
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3-D vector containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D vector containing `Float` values.
pub type Vector3f = Vector3<Float>;

impl Vector3f {
    /// Zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along the z-axis, the normal of the local shading frame.
    pub const Z_AXIS: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
}

/// Creates a new 3-D vector.
///
/// * `x` - X-coordinate.
/// * `y` - Y-coordinate.
/// * `z` - Z-coordinate.
pub fn vector3<T: Num>(x: T, y: T, z: T) -> Vector3<T> {
    Vector3::new(x, y, z)
}

impl<T: Num> Vector3<T> {
    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero vector.
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

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T
    where
        T: Mul<Output = T> + Add<Output = T> + Copy,
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self / self.length()
    }

    /// Returns a new vector containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd + Copy,
    {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }
}

impl<T: Num + Copy> Cross<Vector3<T>> for Vector3<T> {
    type Output = Self;

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    fn cross(&self, other: &Vector3<T>) -> Self::Output {
        Self::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }
}

impl<T: Num + Copy> Cross<Normal3<T>> for Vector3<T> {
    type Output = Self;

    /// Returns the cross product with a normal.
    ///
    /// * `other` - The normal.
    fn cross(&self, other: &Normal3<T>) -> Self::Output {
        Self::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with another vector.
    ///
    /// * `other` -  The other vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with another normal.
    ///
    /// * `other` -  The other normal.
    fn dot(&self, other: &Normal3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Vector3<T>> for Vector3<T> {}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<T, Normal3<T>> for Vector3<T> {}

impl<T: Num> Add for Vector3<T> {
    type Output = Self;

    /// Adds the given vector and returns the result.
    ///
    /// * `other` -  The vector to add.
    fn add(self, other: Self) -> Self::Output {
        Self::Output::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> AddAssign for Vector3<T> {
    /// Performs the `+=` operation.
    ///
    /// * `other` -  The vector to add.
    fn add_assign(&mut self, other: Self) {
        *self = Self::new(self.x + other.x, self.y + other.y, self.z + other.z);
    }
}

impl<T: Num> Sub for Vector3<T> {
    type Output = Self;

    /// Subtracts the given vector and returns the result.
    ///
    /// * `other` -  The vector to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::Output::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num + Copy> SubAssign for Vector3<T> {
    /// Performs the `-=` operation.
    ///
    /// * `other` -  The vector to subtract.
    fn sub_assign(&mut self, other: Self) {
        *self = Self::new(self.x - other.x, self.y - other.y, self.z - other.z);
    }
}

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Vector3<T>;

    /// Scale the vector.
    ///
    /// * `f` -  The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::Output::new(f * self.x, f * self.y, f * self.z)
    }
}

macro_rules! premul {
    ($t: ty) => {
        impl Mul<Vector3<$t>> for $t {
            type Output = Vector3<$t>;
            /// Scale the vector.
            ///
            /// * `v` -  The vector.
            fn mul(self, v: Vector3<$t>) -> Vector3<$t> {
                Vector3::<$t>::new(self * v.x, self * v.y, self * v.z)
            }
        }

        impl Mul<&Vector3<$t>> for $t {
            type Output = Vector3<$t>;
            /// Scale the vector.
            ///
            /// * `v` -  The vector.
            fn mul(self, v: &Vector3<$t>) -> Vector3<$t> {
                Vector3::<$t>::new(self * v.x, self * v.y, self * v.z)
            }
        }
    };
}

premul!(f32);
premul!(f64);

impl<T: Num + Copy> MulAssign<T> for Vector3<T> {
    /// Scale and assign the result to the vector.
    ///
    /// * `f` -  The scaling factor.
    fn mul_assign(&mut self, f: T) {
        *self = Self::new(f * self.x, f * self.y, f * self.z);
    }
}

impl<T: Num + Copy> Div<T> for Vector3<T> {
    type Output = Self;

    /// Scale the vector by 1/f.
    ///
    /// * `f` -  The scaling factor.
    fn div(self, f: T) -> Self::Output {
        debug_assert!(!f.is_zero());

        let inv = T::one() / f;
        Self::Output::new(inv * self.x, inv * self.y, inv * self.z)
    }
}

impl<T: Num + Copy> DivAssign<T> for Vector3<T> {
    /// Scale the vector by 1/f and assign the result to the vector.
    ///
    /// * `f` -  The scaling factor.
    fn div_assign(&mut self, f: T) {
        debug_assert!(!f.is_zero());

        let inv = T::one() / f;
        *self = Self::new(inv * self.x, inv * self.y, inv * self.z);
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector3<T> {
    type Output = Vector3<T>;

    /// Flip the vector's direction (scale by -1).
    fn neg(self) -> Self::Output {
        Self::Output::new(-self.x, -self.y, -self.z)
    }
}

impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    /// Index the vector to get the immutable coordinate value.
    ///
    /// * `i` -  Index in [0, 2].
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid index {} for Vector3", i),
        }
    }
}

impl<T> From<Normal3<T>> for Vector3<T> {
    /// Convert a 3-D normal to a 3-D vector.
    ///
    /// * `n` -  3-D normal.
    fn from(n: Normal3<T>) -> Self {
        Self {
            x: n.x,
            y: n.y,
            z: n.z,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
#[macro_use]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_vector() {
        assert!(Vector3::new(0, 0, 0) == Vector3::zero());
        assert!(Vector3::new(0.0, 0.0, 0.0) == Vector3::zero());
        assert!(Vector3f::ZERO == Vector3::zero());
    }

    #[test]
    fn has_nans() {
        assert!(!Vector3::new(0.0, 0.0, 0.0).has_nans());
        assert!(Vector3::new(f32::NAN, f32::NAN, f32::NAN).has_nans());
    }

    #[test]
    #[should_panic]
    fn normalize_zero_f32() {
        Vector3::<f32>::zero().normalize();
    }

    #[test]
    fn cross_axis_f32() {
        let x_axis = Vector3::new(1.0, 0.0, 0.0);
        let y_axis = Vector3::new(0.0, 1.0, 0.0);
        let z_axis = Vector3::new(0.0, 0.0, 1.0);

        assert!(x_axis.cross(&y_axis) == z_axis);
        assert!(y_axis.cross(&x_axis) == -z_axis);

        assert!(y_axis.cross(&z_axis) == x_axis);
        assert!(z_axis.cross(&y_axis) == -x_axis);

        assert!(z_axis.cross(&x_axis) == y_axis);
        assert!(x_axis.cross(&z_axis) == -y_axis);
    }

    #[test]
    fn face_forward_flips_into_hemisphere() {
        let v = Vector3f::new(0.0, 0.3, -1.0);
        assert_eq!(v.face_forward(&Vector3f::Z_AXIS), -v);
        assert_eq!((-v).face_forward(&Vector3f::Z_AXIS), -v);
    }

    prop_range!(range_f32, f32, -100.0..100.0f32);

    prop_vector3!(
        vector3_f32,
        f32,
        -100.0..100.0f32,
        -100.0..100.0f32,
        -100.0..100.0f32
    );

    proptest! {
        #[test]
        fn length_squared_f32(v in vector3_f32()) {
            prop_assert_eq!(v.length_squared(), v.x * v.x + v.y * v.y + v.z * v.z);
        }

        #[test]
        fn normalize_f32(v in vector3_f32().prop_filter("non-zero", |v| v.length() > 1e-3)) {
            let f = 1.0 / (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
            prop_assert_eq!(v.normalize(), Vector3::new(v.x * f, v.y * f, v.z * f));
        }

        #[test]
        fn abs_dot_f32(v1 in vector3_f32(), v2 in vector3_f32()) {
            prop_assert_eq!(v1.abs_dot(&v2), (v1.x * v2.x + v1.y * v2.y + v1.z * v2.z).abs());
        }

        #[test]
        fn cross_zero_f32(v in vector3_f32()) {
            let zero = Vector3::<f32>::zero();
            prop_assert_eq!(zero.cross(&v), zero);
            prop_assert_eq!(v.cross(&zero), zero);
            prop_assert_eq!(v.cross(&v), zero);
        }

        #[test]
        fn mul_f32(v in vector3_f32(), f in range_f32()) {
            let expected = Vector3::new(v.x * f, v.y * f, v.z * f);
            prop_assert_eq!(v * f, expected);
            prop_assert_eq!(f * v, expected);
        }

        #[test]
        fn neg_f32(v in vector3_f32()) {
            prop_assert_eq!(-v, Vector3::new(-v.x, -v.y, -v.z));
            prop_assert_eq!(--v, v);
        }

        #[test]
        fn index_f32(v in vector3_f32()) {
            prop_assert_eq!(v[0], v.x);
            prop_assert_eq!(v[1], v.y);
            prop_assert_eq!(v[2], v.z);
        }
    }
}
