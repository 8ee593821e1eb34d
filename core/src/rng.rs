//! Random Number Generator.

use crate::geometry::*;
use crate::pbrt::*;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// Implements the PCG32 pseudo-random number generator used to drive Monte
/// Carlo reflectance estimates.
#[derive(Clone)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut ret = Self { state: 0, inc: 0 };
        ret.set_sequence(sequence_index);
        ret
    }

    /// Initialize the random number generator sequence.
    ///
    /// * `init_seq` - The starting sequence to seed with.
    #[inline(always)]
    fn set_sequence(&mut self, init_seq: u64) {
        self.state = 0;
        self.inc = init_seq.wrapping_shl(1) | 1;
        let _ = self.uniform_u32();

        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        let _ = self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;

        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed value over the half open interval
    /// [lower_bound, upper_bound).
    ///
    /// * `lower_bound` - The lower bound.
    /// * `upper_bound` - The upper bound.
    pub fn bounded_uniform_u32(&mut self, lower_bound: u32, upper_bound: u32) -> u32 {
        let b = upper_bound - lower_bound;
        let threshold = b.wrapping_neg() % b;
        loop {
            let r = self.uniform_u32();
            if r >= threshold {
                return lower_bound + r % b;
            }
        }
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        min(
            self.uniform_u32() as Float * hexf32!("0x1.0p-32") as Float,
            ONE_MINUS_EPSILON,
        )
    }

    /// Returns a uniformly distributed 2-D sample in [0.0, 1.0)^2.
    pub fn uniform_point2f(&mut self) -> Point2f {
        let x = self.uniform_float();
        let y = self.uniform_float();
        Point2f::new(x, y)
    }

    /// Randomly permute a slice.
    ///
    /// * `v` - The slice to shuffle.
    pub fn shuffle<T>(&mut self, v: &mut [T]) {
        let count = v.len();
        for i in 0..count {
            let other = i + self.bounded_uniform_u32(0, (count - i) as u32) as usize;
            v.swap(i, other);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
