//! Trowbridge-Reitz (GGX) Distribution

use super::*;
use crate::sampling::*;

/// Anisotropic Trowbridge-Reitz microfacet distribution. Compared to
/// Beckmann–Spizzichino it has a longer tail, so it falls off to zero more
/// slowly for directions far from the surface normal.
#[derive(Copy, Clone, Debug)]
pub struct TrowbridgeReitzDistribution {
    /// Roughness for microfacets oriented perpendicular to the x-axis.
    pub alpha_x: Float,

    /// Roughness for microfacets oriented perpendicular to the y-axis.
    pub alpha_y: Float,

    /// Sample only the microfacet normals visible from the outgoing direction.
    sample_visible_area: bool,

    /// Use the separable Smith masking-shadowing product.
    separable_masking: bool,
}

impl TrowbridgeReitzDistribution {
    /// Create a new `TrowbridgeReitzDistribution`. Roughness values below
    /// `MIN_ALPHA` are floored.
    ///
    /// * `alpha_x`             - Roughness along the x-axis.
    /// * `alpha_y`             - Roughness along the y-axis.
    /// * `sample_visible_area` - Sample visible normals only.
    /// * `separable_masking`   - Use `G1(wo) * G1(wi)` for masking-shadowing.
    pub fn new(
        alpha_x: Float,
        alpha_y: Float,
        sample_visible_area: bool,
        separable_masking: bool,
    ) -> Self {
        Self {
            alpha_x: floor_alpha(alpha_x),
            alpha_y: floor_alpha(alpha_y),
            sample_visible_area,
            separable_masking,
        }
    }

    /// Create a new `TrowbridgeReitzDistribution` from perceptual roughness
    /// values in [0, 1].
    ///
    /// * `roughness_x`         - Roughness along the x-axis.
    /// * `roughness_y`         - Roughness along the y-axis.
    /// * `sample_visible_area` - Sample visible normals only.
    /// * `separable_masking`   - Use `G1(wo) * G1(wi)` for masking-shadowing.
    pub fn from_roughness(
        roughness_x: Float,
        roughness_y: Float,
        sample_visible_area: bool,
        separable_masking: bool,
    ) -> Self {
        Self::new(
            roughness_to_alpha(roughness_x),
            roughness_to_alpha(roughness_y),
            sample_visible_area,
            separable_masking,
        )
    }

    /// Samples the full distribution of normals in the upper hemisphere.
    fn sample_all_normals(&self, u: &Point2f) -> Vector3f {
        let (tan2_theta, phi) = if self.alpha_x == self.alpha_y {
            (
                self.alpha_x * self.alpha_x * u[0] / (1.0 - u[0]),
                TWO_PI * u[1],
            )
        } else {
            let phi = anisotropic_phi(self.alpha_x, self.alpha_y, u[1]);
            let (sin_phi, cos_phi) = (sin(phi), cos(phi));
            let ax2 = self.alpha_x * self.alpha_x;
            let ay2 = self.alpha_y * self.alpha_y;
            let alpha2 = 1.0 / (cos_phi * cos_phi / ax2 + sin_phi * sin_phi / ay2);
            (alpha2 * u[0] / (1.0 - u[0]), phi)
        };

        let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        spherical_direction(sin_theta, cos_theta, phi)
    }
}

impl MicrofacetDistribution for TrowbridgeReitzDistribution {
    fn sample_visible_area(&self) -> bool {
        self.sample_visible_area
    }

    fn separable_masking(&self) -> bool {
        self.separable_masking
    }

    fn d(&self, wh: &Vector3f) -> Float {
        let tan2_theta = tan_2_theta(wh);
        let cos4_theta = cos_2_theta(wh) * cos_2_theta(wh);
        if tan2_theta.is_infinite() || cos4_theta == 0.0 {
            return 0.0;
        }

        let e = tan2_theta
            * (cos_2_phi(wh) / (self.alpha_x * self.alpha_x)
                + sin_2_phi(wh) / (self.alpha_y * self.alpha_y));
        1.0 / (PI * self.alpha_x * self.alpha_y * cos4_theta * (1.0 + e) * (1.0 + e))
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        let abs_tan_theta = abs(tan_theta(w));
        if abs_tan_theta.is_infinite() {
            return 0.0;
        }

        let alpha = (cos_2_phi(w) * self.alpha_x * self.alpha_x
            + sin_2_phi(w) * self.alpha_y * self.alpha_y)
            .sqrt();
        let alpha2_tan2_theta = (alpha * abs_tan_theta) * (alpha * abs_tan_theta);
        (-1.0 + (1.0 + alpha2_tan2_theta).sqrt()) / 2.0
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        if self.sample_visible_area {
            sample_visible_normal(wo, self.alpha_x, self.alpha_y, u, trowbridge_reitz_sample_11)
        } else {
            let wh = self.sample_all_normals(u);
            if same_hemisphere(wo, &wh) {
                wh
            } else {
                -wh
            }
        }
    }
}

impl fmt::Display for TrowbridgeReitzDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ TrowbridgeReitzDistribution alpha_x: {} alpha_y: {} sample_visible_area: {} separable_masking: {} ]",
            self.alpha_x, self.alpha_y, self.sample_visible_area, self.separable_masking
        )
    }
}

/// Samples a slope from the visible normal distribution of the unit-roughness
/// Trowbridge-Reitz distribution for a direction with the given elevation
/// cosine.
///
/// * `cos_theta` - Cosine of the stretched direction's elevation.
/// * `u`         - The 2D uniform random values.
fn trowbridge_reitz_sample_11(cos_theta: Float, u: &Point2f) -> (Float, Float) {
    let (u1, u2) = (u[0], u[1]);

    // Normal incidence.
    if cos_theta > 0.9999 {
        let r = (u1 / (1.0 - u1)).sqrt();
        let phi = TWO_PI * u2;
        return (r * cos(phi), r * sin(phi));
    }

    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let tan_theta = sin_theta / cos_theta;
    let a = 1.0 / tan_theta;
    let g1 = 2.0 / (1.0 + (1.0 + 1.0 / (a * a)).sqrt());

    // Slope x.
    let a = 2.0 * u1 / g1 - 1.0;
    let tmp = min(1.0 / (a * a - 1.0), 1e10);
    let b = tan_theta;
    let d = max(b * b * tmp * tmp - (a * a - b * b) * tmp, 0.0).sqrt();
    let slope_x_1 = b * tmp - d;
    let slope_x_2 = b * tmp + d;
    let slope_x = if a < 0.0 || slope_x_2 > 1.0 / tan_theta {
        slope_x_1
    } else {
        slope_x_2
    };

    // Slope y from a rational fit of the inverse CDF.
    let (s, u2) = if u2 > 0.5 {
        (1.0, 2.0 * (u2 - 0.5))
    } else {
        (-1.0, 2.0 * (0.5 - u2))
    };
    let z = (u2 * (u2 * (u2 * 0.27385 - 0.73369) + 0.46341))
        / (u2 * (u2 * (u2 * 0.093073 + 0.309420) - 1.0) + 0.597999);
    let slope_y = s * z * (1.0 + slope_x * slope_x).sqrt();
    debug_assert!(slope_y.is_finite());

    (slope_x, slope_y)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn d_at_normal_incidence() {
        let d = TrowbridgeReitzDistribution::new(0.5, 0.25, true, false);
        let expected = 1.0 / (PI * 0.5 * 0.25);
        assert!(approx_eq!(f32, d.d(&Vector3f::Z_AXIS), expected, epsilon = 1e-4));
    }

    #[test]
    fn d_is_zero_at_grazing() {
        let d = TrowbridgeReitzDistribution::new(0.001, 0.001, true, false);
        assert_eq!(d.d(&Vector3f::new(0.0, 1.0, 0.0)), 0.0);
        assert!(!d.d(&Vector3f::new(1.0, 0.0, 1e-15)).is_nan());
    }

    #[test]
    fn tail_is_heavier_than_beckmann() {
        let ggx = TrowbridgeReitzDistribution::new(0.2, 0.2, true, false);
        let beckmann = BeckmannDistribution::new(0.2, 0.2, true, false);
        let far = Vector3f::new(0.8, 0.0, 0.6);
        assert!(ggx.d(&far) > beckmann.d(&far));
    }

    #[test]
    fn lambda_matches_closed_form() {
        let d = TrowbridgeReitzDistribution::new(0.5, 0.5, false, false);
        let w = Vector3f::new(0.6, 0.0, 0.8);
        // tanθ = 0.75 so α²tan²θ = 0.140625.
        let expected = (-1.0 + (1.140625 as Float).sqrt()) / 2.0;
        assert!(approx_eq!(f32, d.lambda(&w), expected, epsilon = 1e-6));
        assert_eq!(d.lambda(&Vector3f::Z_AXIS), 0.0);
    }

    #[test]
    fn from_roughness_maps_to_alpha() {
        let d = TrowbridgeReitzDistribution::from_roughness(0.5, 0.5, true, false);
        assert!(approx_eq!(f32, d.alpha_x, roughness_to_alpha(0.5), ulps = 2));
    }

    #[test]
    fn visible_sampling_handles_both_hemispheres() {
        let d = TrowbridgeReitzDistribution::new(0.4, 0.1, true, false);
        let u = Point2f::new(0.3, 0.8);
        let up = d.sample_wh(&Vector3f::new(0.6, 0.0, 0.8), &u);
        let down = d.sample_wh(&Vector3f::new(-0.6, 0.0, -0.8), &u);
        assert!(up.z > 0.0);
        assert!(down.z < 0.0);
        assert!(approx_eq!(f32, up.x, -down.x, epsilon = 1e-6));
        assert!(approx_eq!(f32, up.z, -down.z, epsilon = 1e-6));
    }
}
