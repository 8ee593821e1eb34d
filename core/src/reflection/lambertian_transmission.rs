//! Lambertian Transmission

use super::*;

/// BTDF that scatters light uniformly into the hemisphere opposite to the
/// outgoing direction.
#[derive(Copy, Clone, Debug)]
pub struct LambertianTransmission {
    /// Fraction of incident light that is transmitted.
    t: Spectrum,
}

impl LambertianTransmission {
    /// Create a new instance of `LambertianTransmission`.
    ///
    /// * `t` - Fraction of incident light that is transmitted.
    pub fn new(t: Spectrum) -> Self {
        Self { t }
    }
}

impl BxDFModel for LambertianTransmission {
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_DIFFUSE
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if wo.z * wi.z < 0.0 {
            self.t * INV_PI
        } else {
            Spectrum::ZERO
        }
    }

    // Only an exactly grazing `wo` is rejected.
    fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        if wo.z == 0.0 {
            return None;
        }

        let mut wi = cosine_sample_hemisphere(u);
        if wo.z > 0.0 {
            wi.z *= -1.0;
        }
        let pdf = self.pdf(wo, &wi);
        BxDFSample::new(self.f(wo, &wi), pdf, wi, *wo, self.get_type()).non_zero()
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if wo.z * wi.z < 0.0 {
            abs_cos_theta(wi) * INV_PI
        } else {
            0.0
        }
    }
}

impl fmt::Display for LambertianTransmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ LambertianTransmission t: {} ]", self.t)
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

    #[test]
    fn only_transmits() {
        let bxdf = LambertianTransmission::new(Spectrum::new(0.6));
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wr = Vector3f::new(0.6, 0.0, 0.8);
        let wt = Vector3f::new(0.6, 0.0, -0.8);
        assert!(bxdf.f(&wo, &wr).is_black());
        assert!(approx_eq!(f32, bxdf.f(&wo, &wt)[1], 0.6 * INV_PI, ulps = 2));
        assert!(approx_eq!(f32, bxdf.pdf(&wo, &wt), 0.8 * INV_PI, ulps = 2));
    }

    #[test]
    fn samples_cross_the_surface() {
        let bxdf = LambertianTransmission::new(Spectrum::ONE);
        let mut rng = RNG::new(2);
        for wo in [Vector3f::new(0.0, 0.6, 0.8), Vector3f::new(0.0, 0.6, -0.8)] {
            for _ in 0..100 {
                if let Some(s) = bxdf.sample_f(&wo, &rng.uniform_point2f()) {
                    assert!(s.wi.z * wo.z < 0.0);
                }
            }
        }
    }

    #[test]
    fn rho_hd_converges_to_transmittance() {
        let bxdf = LambertianTransmission::new(Spectrum::new(0.25));
        let mut rng = RNG::new(4);
        let samples = stratified_sample_2d(&mut rng, 64, 64, true);
        let rho = bxdf.rho_hd(&Vector3f::Z_AXIS, &samples);
        assert!(approx_eq!(f32, rho[0], 0.25, epsilon = 0.01));
    }
}
