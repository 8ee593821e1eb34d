//! Microfacet Reflection

use super::*;

/// Torrance-Sparrow BRDF for glossy reflection from a surface made of
/// perfectly specular microfacets.
#[derive(Copy, Clone, Debug)]
pub struct MicrofacetReflection {
    /// Spectrum used to scale the reflected colour.
    r: Spectrum,

    /// Distribution of microfacet normals.
    distribution: MicrofacetModel,

    /// Fresnel term for each microfacet.
    fresnel: Fresnel,
}

impl MicrofacetReflection {
    /// Create a new instance of `MicrofacetReflection`.
    ///
    /// * `r`            - Spectrum used to scale the reflected colour.
    /// * `distribution` - Distribution of microfacet normals.
    /// * `fresnel`      - Fresnel term for each microfacet.
    pub fn new(r: Spectrum, distribution: MicrofacetModel, fresnel: Fresnel) -> Self {
        Self {
            r,
            distribution,
            fresnel,
        }
    }

    /// Returns the normalized half vector for a reflected pair of directions.
    fn half_vector(wo: &Vector3f, wi: &Vector3f) -> Option<Vector3f> {
        let wh = *wi + *wo;
        if wh.length_squared() == 0.0 {
            None
        } else {
            Some(wh.normalize())
        }
    }
}

impl BxDFModel for MicrofacetReflection {
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }

        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        if cos_theta_i < MIN_COS_THETA || cos_theta_o < MIN_COS_THETA {
            return Spectrum::ZERO;
        }

        match Self::half_vector(wo, wi) {
            Some(wh) => {
                let f = self.fresnel.evaluate(wi.dot(&wh.face_forward(&Vector3f::Z_AXIS)));
                self.r * self.distribution.d(&wh) * self.distribution.g(wo, wi) * f
                    / (4.0 * cos_theta_i * cos_theta_o)
            }
            None => Spectrum::ZERO,
        }
    }

    fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        if abs_cos_theta(wo) < MIN_COS_THETA {
            return None;
        }

        let wh = self.distribution.sample_wh(wo, u);
        if wo.dot(&wh) < 0.0 {
            return None;
        }

        let wi = reflect(wo, &wh);
        if !same_hemisphere(wo, &wi) {
            return None;
        }

        let pdf = self.pdf(wo, &wi);
        BxDFSample::new(self.f(wo, &wi), pdf, wi, *wo, self.get_type()).non_zero()
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi)
            || abs_cos_theta(wo) < MIN_COS_THETA
            || abs_cos_theta(wi) < MIN_COS_THETA
        {
            return 0.0;
        }

        match Self::half_vector(wo, wi) {
            Some(wh) => {
                let wo_dot_wh = wo.dot(&wh);
                if wo_dot_wh <= 0.0 {
                    0.0
                } else {
                    // Jacobian of the reflection mapping from wh to wi.
                    self.distribution.pdf(wo, &wh) / (4.0 * wo_dot_wh)
                }
            }
            None => 0.0,
        }
    }
}

impl fmt::Display for MicrofacetReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ MicrofacetReflection r: {} distribution: {} fresnel: {} ]",
            self.r, self.distribution, self.fresnel
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use float_cmp::*;

    fn metal(alpha: Float, visible: bool) -> MicrofacetReflection {
        MicrofacetReflection::new(
            Spectrum::ONE,
            TrowbridgeReitzDistribution::new(alpha, alpha, visible, false).into(),
            Fresnel::NoOp,
        )
    }

    #[test]
    fn mirror_configuration_value() {
        let bxdf = metal(0.5, true);
        let z = Vector3f::Z_AXIS;
        // wh = z so D = 1/(πα²), G = 1 and F = 1.
        let expected = 1.0 / (PI * 0.25) / 4.0;
        assert!(approx_eq!(f32, bxdf.f(&z, &z)[0], expected, epsilon = 1e-5));
    }

    #[test]
    fn rejects_transmission() {
        let bxdf = metal(0.3, true);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.0, -0.6, -0.8);
        assert!(bxdf.f(&wo, &wi).is_black());
        assert_eq!(bxdf.pdf(&wo, &wi), 0.0);
    }

    #[test]
    fn white_furnace_is_energy_bounded() {
        let mut rng = RNG::new(21);
        let samples = stratified_sample_2d(&mut rng, 64, 64, true);
        for visible in [true, false] {
            let bxdf = metal(0.3, visible);
            for wo in [Vector3f::Z_AXIS, Vector3f::new(0.6, 0.0, 0.8)] {
                let rho = bxdf.rho_hd(&wo, &samples);
                // Single scattering loses a little energy to masking.
                assert!(rho[0] > 0.85 && rho[0] < 1.02, "rho_hd = {}", rho);
            }
        }
    }

    #[test]
    fn visible_and_full_sampling_agree() {
        let mut rng = RNG::new(22);
        let samples = stratified_sample_2d(&mut rng, 64, 64, true);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let a = metal(0.4, true).rho_hd(&wo, &samples);
        let b = metal(0.4, false).rho_hd(&wo, &samples);
        assert!(approx_eq!(f32, a[0], b[0], epsilon = 0.03), "{} vs {}", a, b);
    }
}
