//! Common sampling functions.

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;

/// Generate jittered or centred stratified 2D samples over [0, 1)^2.
///
/// * `rng`    - Random number generator.
/// * `nx`     - Number of samples in x-direction.
/// * `ny`     - Number of samples in y-direction.
/// * `jitter` - Jitter the samples.
pub fn stratified_sample_2d(rng: &mut RNG, nx: usize, ny: usize, jitter: bool) -> Vec<Point2f> {
    let dx = 1.0 / nx as Float;
    let dy = 1.0 / ny as Float;

    let mut samples = Vec::with_capacity(nx * ny);
    for y in 0..ny {
        for x in 0..nx {
            let jx = if jitter { rng.uniform_float() } else { 0.5 };
            let jy = if jitter { rng.uniform_float() } else { 0.5 };
            samples.push(Point2f::new(
                min((x as Float + jx) * dx, ONE_MINUS_EPSILON),
                min((y as Float + jy) * dy, ONE_MINUS_EPSILON),
            ));
        }
    }
    samples
}

/// Uniformly sample a direction on a hemisphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_hemisphere(u: &Point2f) -> Vector3f {
    let z = u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * cos(phi), r * sin(phi), z)
}

/// Returns the PDF for uniformly sampling a direction from a hemisphere.
#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u.x - 1.0;
    let oy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::zero();
    }

    // Apply concentric mapping to point
    let (r, theta) = if abs(ox) > abs(oy) {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };

    Point2f::new(r * cos(theta), r * sin(theta))
}

/// Cosine-sample the upper hemisphere using Malley's method: sample the unit
/// disk and project up.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine of the angle between the direction and the normal.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// Returns the direction for the given spherical coordinates in the local
/// shading frame.
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - Azimuth angle φ.
#[inline]
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(
        clamp(sin_theta, -1.0, 1.0) * cos(phi),
        clamp(sin_theta, -1.0, 1.0) * sin(phi),
        clamp(cos_theta, -1.0, 1.0),
    )
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
