//! Beckmann–Spizzichino Distribution

use super::*;
use crate::sampling::*;

/// Beckmann–Spizzichino microfacet distribution built on a Gaussian
/// distribution of microfacet slopes.
#[derive(Copy, Clone, Debug)]
pub struct BeckmannDistribution {
    /// Roughness for microfacets oriented perpendicular to the x-axis where
    /// α = sqrt(2) * σ and σ is the RMS slope of microfacets.
    pub alpha_x: Float,

    /// Roughness for microfacets oriented perpendicular to the y-axis.
    pub alpha_y: Float,

    /// Sample only the microfacet normals visible from the outgoing direction.
    sample_visible_area: bool,

    /// Use the separable Smith masking-shadowing product.
    separable_masking: bool,
}

impl BeckmannDistribution {
    /// Create a new `BeckmannDistribution`. Roughness values below `MIN_ALPHA`
    /// are floored.
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

    /// Create a new `BeckmannDistribution` from perceptual roughness values in
    /// [0, 1].
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

    /// Direction dependent roughness.
    fn alpha(&self, w: &Vector3f) -> Float {
        (cos_2_phi(w) * self.alpha_x * self.alpha_x + sin_2_phi(w) * self.alpha_y * self.alpha_y)
            .sqrt()
    }

    /// Samples the full distribution of normals in the upper hemisphere.
    fn sample_all_normals(&self, u: &Point2f) -> Vector3f {
        let log_sample = (1.0 - u[0]).ln();
        debug_assert!(log_sample.is_finite());

        let (tan2_theta, phi) = if self.alpha_x == self.alpha_y {
            (-self.alpha_x * self.alpha_x * log_sample, TWO_PI * u[1])
        } else {
            let phi = anisotropic_phi(self.alpha_x, self.alpha_y, u[1]);
            let (sin_phi, cos_phi) = (sin(phi), cos(phi));
            let ax2 = self.alpha_x * self.alpha_x;
            let ay2 = self.alpha_y * self.alpha_y;
            (
                -log_sample / (cos_phi * cos_phi / ax2 + sin_phi * sin_phi / ay2),
                phi,
            )
        };

        let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        spherical_direction(sin_theta, cos_theta, phi)
    }
}

impl MicrofacetDistribution for BeckmannDistribution {
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
        (-e).exp() / (PI * self.alpha_x * self.alpha_y * cos4_theta)
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        let abs_tan_theta = abs(tan_theta(w));
        if abs_tan_theta.is_infinite() {
            return 0.0;
        }

        // Rational fit to the exact Beckmann lambda.
        let a = 1.0 / (self.alpha(w) * abs_tan_theta);
        if a >= 1.6 {
            0.0
        } else {
            (1.0 - 1.259 * a + 0.396 * a * a) / (3.535 * a + 2.181 * a * a)
        }
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        if self.sample_visible_area {
            sample_visible_normal(wo, self.alpha_x, self.alpha_y, u, beckmann_sample_11)
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

impl fmt::Display for BeckmannDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ BeckmannDistribution alpha_x: {} alpha_y: {} sample_visible_area: {} separable_masking: {} ]",
            self.alpha_x, self.alpha_y, self.sample_visible_area, self.separable_masking
        )
    }
}

/// Samples a slope from the visible normal distribution of the unit-roughness
/// Beckmann distribution for a direction with the given elevation cosine.
///
/// The CDF is inverted numerically in the erf domain with a safeguarded
/// Newton iteration capped at a fixed number of steps.
///
/// * `cos_theta` - Cosine of the stretched direction's elevation.
/// * `u`         - The 2D uniform random values.
fn beckmann_sample_11(cos_theta: Float, u: &Point2f) -> (Float, Float) {
    const MAX_ITERATIONS: usize = 10;

    // Normal incidence.
    if cos_theta > 0.9999 {
        let r = (-(1.0 - u[0]).ln()).sqrt();
        let phi = TWO_PI * u[1];
        return (r * cos(phi), r * sin(phi));
    }

    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let tan_theta = sin_theta / cos_theta;
    let cot_theta = 1.0 / tan_theta;

    // Bracket in the erf domain.
    let mut lo = -1.0;
    let mut hi = erf(cot_theta);
    let sample_x = max(u[0], 1e-6);

    // Initial guess from a polynomial fit of the inverse.
    let theta = acos(cos_theta);
    let fit = 1.0 + theta * (-0.876 + theta * (0.4265 - 0.0594 * theta));
    let mut b = hi - (1.0 + hi) * (1.0 - sample_x).powf(fit);

    let inv_sqrt_pi = 1.0 / PI.sqrt();
    let normalization =
        1.0 / (1.0 + hi + inv_sqrt_pi * tan_theta * (-cot_theta * cot_theta).exp());

    for _ in 0..MAX_ITERATIONS {
        // Negated comparison also catches NaN.
        if !(b >= lo && b <= hi) {
            b = 0.5 * (lo + hi);
        }

        let inv_erf = erf_inv(b);
        let value = normalization
            * (1.0 + b + inv_sqrt_pi * tan_theta * (-inv_erf * inv_erf).exp())
            - sample_x;
        if abs(value) < 1e-5 {
            break;
        }

        if value > 0.0 {
            hi = b;
        } else {
            lo = b;
        }

        let derivative = normalization * (1.0 - inv_erf * tan_theta);
        b -= value / derivative;
    }

    let slope_x = erf_inv(b);
    let slope_y = erf_inv(2.0 * max(u[1], 1e-6) - 1.0);
    debug_assert!(slope_x.is_finite() && slope_y.is_finite());

    (slope_x, slope_y)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
