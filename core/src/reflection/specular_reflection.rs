//! Specular Reflection

use super::*;

/// BRDF for a perfect mirror. All light leaving along `wo` arrives from the
/// mirrored direction, so the distribution is a delta function: `f` and `pdf`
/// are zero and only `sample_f` produces the reflected direction.
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection {
    /// Spectrum used to scale the reflected colour.
    r: Spectrum,

    /// Fresnel term.
    fresnel: Fresnel,
}

impl SpecularReflection {
    /// Create a new instance of `SpecularReflection`.
    ///
    /// * `r`       - Spectrum used to scale the reflected colour.
    /// * `fresnel` - Fresnel term.
    pub fn new(r: Spectrum, fresnel: Fresnel) -> Self {
        Self { r, fresnel }
    }
}

impl BxDFModel for SpecularReflection {
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR
    }

    fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> Option<BxDFSample> {
        if abs_cos_theta(wo) < MIN_COS_THETA {
            return None;
        }

        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let f = self.fresnel.evaluate(cos_theta(&wi)) * self.r / abs_cos_theta(&wi);
        Some(BxDFSample::new(f, 1.0, wi, *wo, self.get_type()))
    }

    fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}

impl fmt::Display for SpecularReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ SpecularReflection r: {} fresnel: {} ]",
            self.r, self.fresnel
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn mirrors_about_normal() {
        let mirror = SpecularReflection::new(Spectrum::ONE, Fresnel::NoOp);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let s = mirror.sample_f(&wo, &Point2f::new(0.1, 0.9)).unwrap();
        assert_eq!(s.wi, Vector3f::new(-0.6, 0.0, 0.8));
        assert_eq!(s.pdf, 1.0);
        assert!(approx_eq!(f32, s.f[0], 1.0 / 0.8, ulps = 2));
        assert!(s.bxdf_type.is_specular());
    }

    #[test]
    fn delta_lobe_has_no_density() {
        let mirror = SpecularReflection::new(Spectrum::ONE, Fresnel::NoOp);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let wi = Vector3f::new(-0.6, 0.0, 0.8);
        assert!(mirror.f(&wo, &wi).is_black());
        assert_eq!(mirror.pdf(&wo, &wi), 0.0);
    }

    #[test]
    fn rho_hd_is_fresnel_reflectance() {
        let mirror = SpecularReflection::new(Spectrum::ONE, Fresnel::dielectric(1.0, 1.5));
        let rho = mirror.rho_hd(&Vector3f::Z_AXIS, &[Point2f::new(0.5, 0.5)]);
        assert!(approx_eq!(f32, rho[0], 0.04, epsilon = 1e-5));
    }
}
