//! Shading Frame Trigonometry

use crate::geometry::*;
use crate::pbrt::*;

/// Cosines with a smaller magnitude are treated as grazing by the glossy
/// lobes, whose formulas divide by cosθ.
pub const MIN_COS_THETA: Float = 1e-6;

/// Indicates whether light (radiance) or importance is carried along a path.
/// Refraction scales radiance, but not importance, by the squared ratio of
/// indices of refraction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportMode {
    Radiance,
    Importance,
}

impl Default for TransportMode {
    fn default() -> Self {
        Self::Radiance
    }
}

/// Returns the cosine of the angle θ between `w` and the shading normal
/// (z-axis).
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns cos²θ.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_2_theta(w: &Vector3f) -> Float {
    w.z * w.z
}

/// Returns |cosθ|.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns sin²θ.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_2_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - cos_2_theta(w))
}

/// Returns sinθ.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_theta(w: &Vector3f) -> Float {
    sin_2_theta(w).sqrt()
}

/// Returns tanθ. Infinite when `w` lies in the tangent plane.
///
/// * `w` - The direction vector.
#[inline]
pub fn tan_theta(w: &Vector3f) -> Float {
    sin_theta(w) / cos_theta(w)
}

/// Returns tan²θ. Infinite when `w` lies in the tangent plane.
///
/// * `w` - The direction vector.
#[inline]
pub fn tan_2_theta(w: &Vector3f) -> Float {
    sin_2_theta(w) / cos_2_theta(w)
}

/// Returns the cosine of the azimuth φ of `w` projected onto the tangent
/// plane. Directions along the normal have φ = 0.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_phi(w: &Vector3f) -> Float {
    let s = sin_theta(w);
    if s == 0.0 {
        1.0
    } else {
        clamp(w.x / s, -1.0, 1.0)
    }
}

/// Returns the sine of the azimuth φ.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_phi(w: &Vector3f) -> Float {
    let s = sin_theta(w);
    if s == 0.0 {
        0.0
    } else {
        clamp(w.y / s, -1.0, 1.0)
    }
}

/// Returns cos²φ.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_2_phi(w: &Vector3f) -> Float {
    cos_phi(w) * cos_phi(w)
}

/// Returns sin²φ.
///
/// * `w` - The direction vector.
#[inline]
pub fn sin_2_phi(w: &Vector3f) -> Float {
    sin_phi(w) * sin_phi(w)
}

/// Returns the cosine of the azimuthal difference between two directions.
///
/// * `wa` - First direction vector.
/// * `wb` - Second direction vector.
pub fn cos_d_phi(wa: &Vector3f, wb: &Vector3f) -> Float {
    let waxy = wa.x * wa.x + wa.y * wa.y;
    let wbxy = wb.x * wb.x + wb.y * wb.y;
    if waxy == 0.0 || wbxy == 0.0 {
        1.0
    } else {
        clamp((wa.x * wb.x + wa.y * wb.y) / (waxy * wbxy).sqrt(), -1.0, 1.0)
    }
}

/// Returns `true` if both directions lie strictly on the same side of the
/// tangent plane.
///
/// * `w`  - First direction.
/// * `wp` - Second direction.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}

/// Mirrors `wo` about `n`.
///
/// * `wo` - Direction to reflect.
/// * `n`  - Normal to reflect about.
#[inline]
pub fn reflect(wo: &Vector3f, n: &Vector3f) -> Vector3f {
    *n * (2.0 * wo.dot(n)) - *wo
}

/// Refracts `wi` through a surface with normal `n` lying in the same
/// hemisphere as `wi`. Returns `None` on total internal reflection.
///
/// * `wi`  - Incident direction.
/// * `n`   - Surface normal.
/// * `eta` - Ratio of indices of refraction, incident over transmitted.
pub fn refract(wi: &Vector3f, n: &Vector3f, eta: Float) -> Option<Vector3f> {
    // Snell's law.
    let cos_theta_i = n.dot(wi);
    let sin_2_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i);
    let sin_2_theta_t = eta * eta * sin_2_theta_i;
    if sin_2_theta_t >= 1.0 {
        return None;
    }

    let cos_theta_t = (1.0 - sin_2_theta_t).sqrt();
    Some(-*wi * eta + *n * (eta * cos_theta_i - cos_theta_t))
}

/// Schlick's approximation weight `(1 - cosθ)^5`.
///
/// * `cos_theta` - Cosine of the angle to the normal.
#[inline]
pub fn schlick_weight(cos_theta: Float) -> Float {
    pow5(clamp(1.0 - cos_theta, 0.0, 1.0))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn trig_along_normal() {
        let w = Vector3f::Z_AXIS;
        assert_eq!(cos_theta(&w), 1.0);
        assert_eq!(sin_theta(&w), 0.0);
        assert_eq!(tan_theta(&w), 0.0);
        assert_eq!(cos_phi(&w), 1.0);
        assert_eq!(sin_phi(&w), 0.0);
    }

    #[test]
    fn tan_is_infinite_in_tangent_plane() {
        let w = Vector3f::new(0.0, 1.0, 0.0);
        assert!(tan_theta(&w).is_infinite());
        assert!(tan_2_theta(&w).is_infinite());
        assert_eq!(sin_phi(&w), 1.0);
    }

    #[test]
    fn same_hemisphere_excludes_tangent_plane() {
        let up = Vector3f::new(0.0, 0.6, 0.8);
        let down = Vector3f::new(0.0, 0.6, -0.8);
        let flat = Vector3f::new(1.0, 0.0, 0.0);
        assert!(same_hemisphere(&up, &up));
        assert!(!same_hemisphere(&up, &down));
        assert!(!same_hemisphere(&up, &flat));
    }

    #[test]
    fn reflect_about_normal() {
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let wi = reflect(&wo, &Vector3f::Z_AXIS);
        assert!(approx_eq!(f32, wi.x, -0.6, epsilon = 1e-6));
        assert!(approx_eq!(f32, wi.z, 0.8, epsilon = 1e-6));
    }

    #[test]
    fn refract_obeys_snell() {
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let eta = 1.0 / 1.5;
        let wt = refract(&wi, &Vector3f::Z_AXIS, eta).unwrap();
        assert!(wt.z < 0.0);
        assert!(approx_eq!(f32, wt.length(), 1.0, epsilon = 1e-5));
        // sinθt = η sinθi
        assert!(approx_eq!(f32, sin_theta(&wt), eta * 0.6, epsilon = 1e-5));
    }

    #[test]
    fn refract_total_internal_reflection() {
        let wi = Vector3f::new(0.9, 0.0, 0.1).normalize();
        assert!(refract(&wi, &Vector3f::Z_AXIS, 1.5).is_none());
    }

    #[test]
    fn schlick_weight_bounds() {
        assert_eq!(schlick_weight(1.0), 0.0);
        assert_eq!(schlick_weight(0.0), 1.0);
        assert!(approx_eq!(f32, schlick_weight(0.5), 0.03125, epsilon = 1e-7));
    }
}
