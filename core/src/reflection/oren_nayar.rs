//! Oren-Nayar Microfacet Model

use super::*;

/// BRDF for rough diffuse surfaces modelled as V-shaped Lambertian
/// microfacets with a Gaussian distribution of orientation angles.
#[derive(Copy, Clone, Debug)]
pub struct OrenNayar {
    /// Fraction of incident light that is scattered.
    r: Spectrum,

    /// Precomputed `A = 1 - σ² / (2(σ² + 0.33))`.
    a: Float,

    /// Precomputed `B = 0.45σ² / (σ² + 0.09)`.
    b: Float,
}

impl OrenNayar {
    /// Create a new instance of `OrenNayar`.
    ///
    /// * `r`     - Fraction of incident light that is scattered.
    /// * `sigma` - Standard deviation of the microfacet orientation angle in
    ///             degrees. Values outside [0, 90] are clamped.
    pub fn new(r: Spectrum, sigma: Float) -> Self {
        let clamped = clamp(sigma, 0.0, 90.0);
        if clamped != sigma {
            debug!("Oren-Nayar sigma {} clamped to {}", sigma, clamped);
        }

        let sigma = clamped.to_radians();
        let sigma2 = sigma * sigma;
        Self {
            r,
            a: 1.0 - sigma2 / (2.0 * (sigma2 + 0.33)),
            b: 0.45 * sigma2 / (sigma2 + 0.09),
        }
    }
}

impl BxDFModel for OrenNayar {
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }

        // tan β is unbounded at grazing.
        let cos_theta_i = abs_cos_theta(wi);
        let cos_theta_o = abs_cos_theta(wo);
        if cos_theta_i < MIN_COS_THETA || cos_theta_o < MIN_COS_THETA {
            return Spectrum::ZERO;
        }

        let sin_theta_i = sin_theta(wi);
        let sin_theta_o = sin_theta(wo);

        // max(0, cos(φi - φo)), undefined along the normal.
        let max_cos = if sin_theta_i > 1e-4 && sin_theta_o > 1e-4 {
            max(0.0, cos_d_phi(wi, wo))
        } else {
            0.0
        };

        // α is the larger of θi, θo and β the smaller.
        let (sin_alpha, tan_beta) = if cos_theta_i > cos_theta_o {
            (sin_theta_o, sin_theta_i / cos_theta_i)
        } else {
            (sin_theta_i, sin_theta_o / cos_theta_o)
        };

        self.r * INV_PI * (self.a + self.b * max_cos * sin_alpha * tan_beta)
    }
}

impl fmt::Display for OrenNayar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ OrenNayar r: {} a: {} b: {} ]", self.r, self.a, self.b)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
