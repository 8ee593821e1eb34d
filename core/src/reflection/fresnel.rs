//! Fresnel Dielectrics and Conductors

use super::*;
use std::mem::swap;

/// Computes the fraction of light reflected at a smooth boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fresnel {
    /// Reflects all incident light.
    NoOp,

    /// Boundary between two dielectric media.
    Dielectric {
        /// Index of refraction on the exterior side of the surface.
        eta_i: Float,
        /// Index of refraction on the interior side of the surface.
        eta_t: Float,
    },

    /// Boundary between a dielectric and a conductor.
    Conductor {
        /// Index of refraction of the exterior dielectric.
        eta_i: Spectrum,
        /// Index of refraction of the conductor.
        eta_t: Spectrum,
        /// Absorption coefficient of the conductor.
        k: Spectrum,
    },
}

impl Fresnel {
    /// Create a dielectric boundary.
    ///
    /// * `eta_i` - Index of refraction on the exterior side.
    /// * `eta_t` - Index of refraction on the interior side.
    pub fn dielectric(eta_i: Float, eta_t: Float) -> Self {
        assert!(eta_i > 0.0 && eta_t > 0.0, "Invalid indices of refraction");
        Self::Dielectric { eta_i, eta_t }
    }

    /// Create a conductor boundary.
    ///
    /// * `eta_i` - Index of refraction of the exterior dielectric.
    /// * `eta_t` - Index of refraction of the conductor.
    /// * `k`     - Absorption coefficient of the conductor.
    pub fn conductor(eta_i: Spectrum, eta_t: Spectrum, k: Spectrum) -> Self {
        Self::Conductor { eta_i, eta_t, k }
    }

    /// Returns the reflected fraction of light.
    ///
    /// * `cos_theta_i` - Cosine of the angle between the incident direction
    ///                   and the surface normal.
    pub fn evaluate(&self, cos_theta_i: Float) -> Spectrum {
        match self {
            Self::NoOp => Spectrum::ONE,
            Self::Dielectric { eta_i, eta_t } => {
                Spectrum::new(fr_dielectric(cos_theta_i, *eta_i, *eta_t))
            }
            // Conductors reflect the same from either side.
            Self::Conductor { eta_i, eta_t, k } => {
                fr_conductor(abs(cos_theta_i), *eta_i, *eta_t, *k)
            }
        }
    }
}

impl fmt::Display for Fresnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOp => write!(f, "[ FresnelNoOp ]"),
            Self::Dielectric { eta_i, eta_t } => {
                write!(f, "[ FresnelDielectric eta_i: {} eta_t: {} ]", eta_i, eta_t)
            }
            Self::Conductor { eta_i, eta_t, k } => write!(
                f,
                "[ FresnelConductor eta_i: {} eta_t: {} k: {} ]",
                eta_i, eta_t, k
            ),
        }
    }
}

/// Returns the Fresnel reflectance of a dielectric boundary for unpolarized
/// light. Negative cosines are treated as arriving from the interior side.
///
/// * `cos_theta_i` - Cosine of the incident angle.
/// * `eta_i`       - Index of refraction on the incident side.
/// * `eta_t`       - Index of refraction on the transmitted side.
pub fn fr_dielectric(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);
    let (mut eta_i, mut eta_t) = (eta_i, eta_t);
    if cos_theta_i <= 0.0 {
        swap(&mut eta_i, &mut eta_t);
        cos_theta_i = abs(cos_theta_i);
    }

    let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;

    // Total internal reflection.
    if sin_theta_t >= 1.0 {
        return 1.0;
    }

    let cos_theta_t = max(0.0, 1.0 - sin_theta_t * sin_theta_t).sqrt();
    let r_parl = ((eta_t * cos_theta_i) - (eta_i * cos_theta_t))
        / ((eta_t * cos_theta_i) + (eta_i * cos_theta_t));
    let r_perp = ((eta_i * cos_theta_i) - (eta_t * cos_theta_t))
        / ((eta_i * cos_theta_i) + (eta_t * cos_theta_t));
    (r_parl * r_parl + r_perp * r_perp) / 2.0
}

/// Returns the Fresnel reflectance at a conductor boundary for unpolarized
/// light.
///
/// * `cos_theta_i` - Cosine of the incident angle on the exterior side.
/// * `eta_i`       - Index of refraction of the exterior dielectric.
/// * `eta_t`       - Index of refraction of the conductor.
/// * `k`           - Absorption coefficient of the conductor.
pub fn fr_conductor(cos_theta_i: Float, eta_i: Spectrum, eta_t: Spectrum, k: Spectrum) -> Spectrum {
    let cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);
    let eta = eta_t / eta_i;
    let eta_k = k / eta_i;

    let cos2 = cos_theta_i * cos_theta_i;
    let sin2 = 1.0 - cos2;
    let eta2 = eta * eta;
    let eta_k2 = eta_k * eta_k;

    let t0 = eta2 - eta_k2 - Spectrum::new(sin2);
    let a2_plus_b2 = (t0 * t0 + 4.0 * eta2 * eta_k2).sqrt();
    let t1 = a2_plus_b2 + Spectrum::new(cos2);
    let a = (0.5 * (a2_plus_b2 + t0)).sqrt();
    let t2 = 2.0 * cos_theta_i * a;
    let rs = (t1 - t2) / (t1 + t2);

    let t3 = cos2 * a2_plus_b2 + Spectrum::new(sin2 * sin2);
    let t4 = t2 * sin2;
    let rp = rs * (t3 - t4) / (t3 + t4);

    0.5 * (rp + rs)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
