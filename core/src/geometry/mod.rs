//! Geometry

use super::pbrt::*;

// Define macros for property based testing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point2 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr) -> Point2<$t> {
                Point2 { x, y }
            }
        }
    };
}

/// Generates unit direction vectors from spherical coordinates, covering both
/// hemispheres including directions arbitrarily close to grazing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_unit_vector3 {
    ($name: ident) => {
        prop_compose! {
            fn $name()(cos_theta in -1.0..=1.0f32, phi in 0.0..6.2831853f32) -> Vector3<f32> {
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                Vector3 {
                    x: sin_theta * phi.cos(),
                    y: sin_theta * phi.sin(),
                    z: cos_theta,
                }
            }
        }
    };
}

mod common;
mod coordinate_system;
mod normal;
mod point2;
mod vector3;

// Re-export
pub use common::*;
pub use coordinate_system::*;
pub use normal::*;
pub use point2::*;
pub use vector3::*;
