//! Microfacet Transmission

use super::*;

/// Torrance-Sparrow BTDF for glossy transmission through a rough dielectric
/// boundary. The exterior medium has index of refraction `eta_a` and lies on
/// the side of the positive normal.
#[derive(Copy, Clone, Debug)]
pub struct MicrofacetTransmission {
    /// Spectrum used to scale the transmitted colour.
    t: Spectrum,

    /// Distribution of microfacet normals.
    distribution: MicrofacetModel,

    /// Index of refraction above the surface.
    eta_a: Float,

    /// Index of refraction below the surface.
    eta_b: Float,

    /// Fresnel term for the boundary.
    fresnel: Fresnel,

    /// Quantity carried along the path.
    mode: TransportMode,
}

impl MicrofacetTransmission {
    /// Create a new instance of `MicrofacetTransmission`.
    ///
    /// * `t`            - Spectrum used to scale the transmitted colour.
    /// * `distribution` - Distribution of microfacet normals.
    /// * `fresnel`      - Fresnel term for the boundary, usually
    ///                    `Fresnel::dielectric(eta_a, eta_b)`.
    /// * `eta_a`        - Index of refraction above the surface.
    /// * `eta_b`        - Index of refraction below the surface.
    /// * `mode`         - Quantity carried along the path.
    pub fn new(
        t: Spectrum,
        distribution: MicrofacetModel,
        fresnel: Fresnel,
        eta_a: Float,
        eta_b: Float,
        mode: TransportMode,
    ) -> Self {
        Self {
            t,
            distribution,
            eta_a,
            eta_b,
            fresnel,
            mode,
        }
    }

    /// Relative index of refraction, transmitted over incident, for light
    /// leaving along `wo`.
    fn relative_eta(&self, wo: &Vector3f) -> Float {
        if cos_theta(wo) > 0.0 {
            self.eta_b / self.eta_a
        } else {
            self.eta_a / self.eta_b
        }
    }

    /// Returns the generalized half vector `wo + η wi`, normalized and facing
    /// +z, or `None` when the weighted sum vanishes.
    fn half_vector(wo: &Vector3f, wi: &Vector3f, eta: Float) -> Option<Vector3f> {
        let wh = *wo + *wi * eta;
        if wh.length_squared() < MIN_COS_THETA * MIN_COS_THETA {
            return None;
        }

        let wh = wh.normalize();
        Some(if wh.z < 0.0 { -wh } else { wh })
    }

    /// Returns true if the pair can be connected by refraction, with
    /// directions on opposite sides of the surface, neither grazing.
    fn is_transmission_pair(wo: &Vector3f, wi: &Vector3f) -> bool {
        !same_hemisphere(wo, wi)
            && abs_cos_theta(wo) >= MIN_COS_THETA
            && abs_cos_theta(wi) >= MIN_COS_THETA
    }
}

impl BxDFModel for MicrofacetTransmission {
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_GLOSSY
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !Self::is_transmission_pair(wo, wi) {
            return Spectrum::ZERO;
        }

        let eta = self.relative_eta(wo);
        let wh = match Self::half_vector(wo, wi, eta) {
            Some(wh) => wh,
            None => return Spectrum::ZERO,
        };

        // Both directions must lie on opposite sides of the microfacet.
        let wo_dot_wh = wo.dot(&wh);
        let wi_dot_wh = wi.dot(&wh);
        if wo_dot_wh * wi_dot_wh > 0.0 {
            return Spectrum::ZERO;
        }

        let f = self.fresnel.evaluate(wo_dot_wh);
        let sqrt_denom = wo_dot_wh + eta * wi_dot_wh;
        let factor = match self.mode {
            TransportMode::Radiance => 1.0 / eta,
            TransportMode::Importance => 1.0,
        };

        let d = self.distribution.d(&wh);
        let g = self.distribution.g(wo, wi);
        let numerator = d * g * eta * eta * abs(wi_dot_wh) * abs(wo_dot_wh) * factor * factor;
        let denominator = cos_theta(wi) * cos_theta(wo) * sqrt_denom * sqrt_denom;
        (Spectrum::ONE - f) * self.t * abs(numerator / denominator)
    }

    fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        if abs_cos_theta(wo) < MIN_COS_THETA {
            return None;
        }

        let wh = self.distribution.sample_wh(wo, u);
        if wo.dot(&wh) < 0.0 {
            return None;
        }

        let eta = if cos_theta(wo) > 0.0 {
            self.eta_a / self.eta_b
        } else {
            self.eta_b / self.eta_a
        };
        let wi = refract(wo, &wh, eta)?;

        let pdf = self.pdf(wo, &wi);
        BxDFSample::new(self.f(wo, &wi), pdf, wi, *wo, self.get_type()).non_zero()
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !Self::is_transmission_pair(wo, wi) {
            return 0.0;
        }

        let eta = self.relative_eta(wo);
        let wh = match Self::half_vector(wo, wi, eta) {
            Some(wh) => wh,
            None => return 0.0,
        };

        let wo_dot_wh = wo.dot(&wh);
        let wi_dot_wh = wi.dot(&wh);
        if wo_dot_wh * wi_dot_wh > 0.0 {
            return 0.0;
        }

        // Jacobian of the refraction mapping from wh to wi.
        let sqrt_denom = wo_dot_wh + eta * wi_dot_wh;
        let dwh_dwi = abs((eta * eta * wi_dot_wh) / (sqrt_denom * sqrt_denom));
        self.distribution.pdf(wo, &wh) * dwh_dwi
    }
}

impl fmt::Display for MicrofacetTransmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ MicrofacetTransmission t: {} distribution: {} fresnel: {} eta_a: {} eta_b: {} mode: {:?} ]",
            self.t, self.distribution, self.fresnel, self.eta_a, self.eta_b, self.mode
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

    fn glass(alpha: Float, mode: TransportMode) -> MicrofacetTransmission {
        let d = BeckmannDistribution::new(alpha, alpha, true, false);
        MicrofacetTransmission::new(
            Spectrum::ONE,
            d.into(),
            Fresnel::dielectric(1.0, 1.5),
            1.0,
            1.5,
            mode,
        )
    }

    #[test]
    fn same_hemisphere_is_not_transmitted() {
        let bxdf = glass(0.3, TransportMode::Radiance);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        assert!(bxdf.f(&wo, &wi).is_black());
        assert_eq!(bxdf.pdf(&wo, &wi), 0.0);
    }

    #[test]
    fn straight_through_is_transmitted() {
        let bxdf = glass(0.3, TransportMode::Importance);
        let wo = Vector3f::Z_AXIS;
        let wi = -Vector3f::Z_AXIS;
        assert!(bxdf.f(&wo, &wi)[0] > 0.0);
        assert!(bxdf.pdf(&wo, &wi) > 0.0);
    }

    #[test]
    fn parallel_directions_without_refraction_are_rejected() {
        // With matched indices wo + wi vanishes for wi = -wo.
        let d = TrowbridgeReitzDistribution::new(0.3, 0.3, true, false);
        let bxdf = MicrofacetTransmission::new(
            Spectrum::ONE,
            d.into(),
            Fresnel::dielectric(1.0, 1.0),
            1.0,
            1.0,
            TransportMode::Radiance,
        );
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let wi = -wo;
        assert!(bxdf.f(&wo, &wi).is_black());
        assert_eq!(bxdf.pdf(&wo, &wi), 0.0);
    }

    #[test]
    fn samples_refract_through_the_surface() {
        let bxdf = glass(0.2, TransportMode::Radiance);
        let mut rng = RNG::new(31);
        for wo in [Vector3f::new(0.3, 0.0, 0.954), Vector3f::new(0.1, 0.2, -0.975)] {
            let wo = wo.normalize();
            let mut found = 0;
            for _ in 0..200 {
                if let Some(s) = bxdf.sample_f(&wo, &rng.uniform_point2f()) {
                    assert!(s.wi.z * wo.z < 0.0);
                    assert!(approx_eq!(f32, s.wi.length(), 1.0, epsilon = 1e-4));
                    found += 1;
                }
            }
            assert!(found > 150);
        }
    }

    #[test]
    fn total_internal_reflection_yields_no_sample() {
        let bxdf = glass(0.001, TransportMode::Radiance);
        let wo = Vector3f::new(0.9, 0.0, -0.436).normalize();
        assert!(bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5)).is_none());
    }

    #[test]
    fn radiance_is_scaled_by_relative_index() {
        let radiance = glass(0.25, TransportMode::Radiance);
        let importance = glass(0.25, TransportMode::Importance);
        let wo = Vector3f::new(0.3, 0.1, 0.9).normalize();
        let wi = Vector3f::new(-0.2, 0.0, -0.98).normalize();
        let r = radiance.f(&wo, &wi)[0];
        let i = importance.f(&wo, &wi)[0];
        assert!(i > 0.0);
        assert!(approx_eq!(f32, r, i / 2.25, epsilon = 1e-4 * i));
    }

    #[test]
    fn uses_the_given_fresnel_term() {
        let d = BeckmannDistribution::new(0.3, 0.3, true, false);
        let wo = Vector3f::new(0.3, 0.1, 0.9).normalize();
        let wi = Vector3f::new(-0.2, 0.0, -0.98).normalize();
        let mode = TransportMode::Importance;

        // Everything is reflected so nothing is left to transmit.
        let mirror =
            MicrofacetTransmission::new(Spectrum::ONE, d.into(), Fresnel::NoOp, 1.0, 1.5, mode);
        assert!(mirror.f(&wo, &wi).is_black());
        assert!(mirror.pdf(&wo, &wi) > 0.0);

        let dense = MicrofacetTransmission::new(
            Spectrum::ONE,
            d.into(),
            Fresnel::dielectric(1.0, 2.5),
            1.0,
            1.5,
            mode,
        );
        let f_dense = dense.f(&wo, &wi)[0];
        let f_glass = glass(0.3, mode).f(&wo, &wi)[0];
        assert!(f_dense > 0.0 && f_dense < f_glass);
    }

    #[test]
    fn transmitted_energy_accounts_for_fresnel() {
        let bxdf = glass(0.1, TransportMode::Importance);
        let mut rng = RNG::new(32);
        let samples = stratified_sample_2d(&mut rng, 64, 64, true);
        let rho = bxdf.rho_hd(&Vector3f::Z_AXIS, &samples);
        // About 4% is reflected at normal incidence.
        assert!(rho[0] > 0.85 && rho[0] < 0.97, "rho_hd = {}", rho);
    }
}
