//! 2-D Points

#![allow(dead_code)]
use super::{abs, Float};
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Index, Neg};

/// A 2-D point containing numeric values. Used for canonical uniform samples
/// in [0, 1)^2.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero())
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Returns a new point containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd + Copy,
    {
        Self::new(abs(self.x), abs(self.y))
    }
}

impl<T> Index<usize> for Point2<T> {
    type Output = T;

    /// Index the point to get the immutable coordinate value.
    ///
    /// * `i` - Index in [0, 1].
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid index {} for Point2", i),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
