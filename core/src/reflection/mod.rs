//! Reflection and surface scattering models

use crate::geometry::*;
use crate::microfacet::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::fmt;

mod bsdf;
mod bxdf_sample;
mod bxdf_type;
mod common;
mod disney;
mod fresnel;
mod lambertian_reflection;
mod lambertian_transmission;
mod microfacet_reflection;
mod microfacet_transmission;
mod oren_nayar;
mod scaled_bxdf;
mod specular_reflection;

// Re-export
pub use bsdf::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use disney::*;
pub use fresnel::*;
pub use lambertian_reflection::*;
pub use lambertian_transmission::*;
pub use microfacet_reflection::*;
pub use microfacet_transmission::*;
pub use oren_nayar::*;
pub use scaled_bxdf::*;
pub use specular_reflection::*;

/// Operations shared by every reflection/transmission model. All directions
/// are unit vectors in the local shading frame where the normal is +z.
///
/// The provided `sample_f` and `pdf` cosine-sample the hemisphere of `wo`,
/// which suits diffuse reflection lobes.
pub trait BxDFModel {
    /// Returns the BxDF type.
    fn get_type(&self) -> BxDFType;

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum;

    /// Samples an incident direction for the given outgoing direction. Returns
    /// `None` when no direction can be sampled. The provided implementation
    /// only rejects an exactly grazing `wo` (`wo.z == 0`); near-grazing
    /// directions still sample a finite value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        if wo.z == 0.0 {
            return None;
        }

        // Cosine-sample the hemisphere, flipping the direction to the side of `wo`.
        let mut wi = cosine_sample_hemisphere(u);
        if wo.z < 0.0 {
            wi.z *= -1.0;
        }
        let pdf = self.pdf(wo, &wi);
        BxDFSample::new(self.f(wo, &wi), pdf, wi, *wo, self.get_type()).non_zero()
    }

    /// Evaluates the PDF of `sample_f` for the pair of directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if same_hemisphere(wo, wi) {
            abs_cos_theta(wi) * INV_PI
        } else {
            0.0
        }
    }

    /// Estimates the hemispherical-directional reflectance ρhd.
    ///
    /// * `wo`      - Outgoing direction.
    /// * `samples` - Samples used by the Monte Carlo estimate.
    fn rho_hd(&self, wo: &Vector3f, samples: &[Point2f]) -> Spectrum {
        if samples.is_empty() {
            return Spectrum::ZERO;
        }

        let mut r = Spectrum::ZERO;
        for u in samples {
            if let Some(s) = self.sample_f(wo, u) {
                r += s.f * abs_cos_theta(&s.wi) / s.pdf;
            }
        }
        r / samples.len() as Float
    }

    /// Estimates the hemispherical-hemispherical reflectance ρhh.
    ///
    /// * `samples1` - Samples used to pick outgoing directions.
    /// * `samples2` - Samples used to pick incident directions.
    fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f]) -> Spectrum {
        assert!(
            samples1.len() == samples2.len(),
            "rho_hh sample batches differ in length"
        );
        if samples1.is_empty() {
            return Spectrum::ZERO;
        }

        let pdf_o = uniform_hemisphere_pdf();
        let mut r = Spectrum::ZERO;
        for (u1, u2) in samples1.iter().zip(samples2.iter()) {
            let wo = uniform_sample_hemisphere(u1);
            if let Some(s) = self.sample_f(&wo, u2) {
                r += s.f * abs_cos_theta(&s.wi) * abs_cos_theta(&wo) / (pdf_o * s.pdf);
            }
        }
        r / (PI * samples1.len() as Float)
    }

    /// Returns true if every flag of this BxDF is present in `t`.
    ///
    /// * `t` - Flags to match.
    fn matches_flags(&self, t: BxDFType) -> bool {
        self.get_type().matches(t)
    }
}

impl<B: BxDFModel + ?Sized> BxDFModel for Box<B> {
    fn get_type(&self) -> BxDFType {
        (**self).get_type()
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        (**self).f(wo, wi)
    }

    fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        (**self).sample_f(wo, u)
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        (**self).pdf(wo, wi)
    }

    fn rho_hd(&self, wo: &Vector3f, samples: &[Point2f]) -> Spectrum {
        (**self).rho_hd(wo, samples)
    }

    fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f]) -> Spectrum {
        (**self).rho_hh(samples1, samples2)
    }
}

/// BxDF for BRDFs and BTDFs.
///
/// The models are enumerated directly so a `BSDF` can own them by value and
/// dispatch without trait objects.
#[derive(Clone, Debug)]
pub enum BxDF {
    DisneyDiffuse(DisneyDiffuse),
    DisneyFakeSS(DisneyFakeSS),
    LambertianReflection(LambertianReflection),
    LambertianTransmission(LambertianTransmission),
    MicrofacetReflection(MicrofacetReflection),
    MicrofacetTransmission(MicrofacetTransmission),
    OrenNayar(OrenNayar),
    ScaledBxDF(ScaledBxDF),
    SpecularReflection(SpecularReflection),
}

/// Expands `$call` once per variant with the wrapped model bound to `$b`.
macro_rules! dispatch {
    ($self: expr, $b: ident => $call: expr) => {
        match $self {
            BxDF::DisneyDiffuse($b) => $call,
            BxDF::DisneyFakeSS($b) => $call,
            BxDF::LambertianReflection($b) => $call,
            BxDF::LambertianTransmission($b) => $call,
            BxDF::MicrofacetReflection($b) => $call,
            BxDF::MicrofacetTransmission($b) => $call,
            BxDF::OrenNayar($b) => $call,
            BxDF::ScaledBxDF($b) => $call,
            BxDF::SpecularReflection($b) => $call,
        }
    };
}

impl BxDFModel for BxDF {
    fn get_type(&self) -> BxDFType {
        dispatch!(self, b => b.get_type())
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        dispatch!(self, b => b.f(wo, wi))
    }

    fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        dispatch!(self, b => b.sample_f(wo, u))
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        dispatch!(self, b => b.pdf(wo, wi))
    }

    fn rho_hd(&self, wo: &Vector3f, samples: &[Point2f]) -> Spectrum {
        dispatch!(self, b => b.rho_hd(wo, samples))
    }

    fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f]) -> Spectrum {
        dispatch!(self, b => b.rho_hh(samples1, samples2))
    }
}

impl fmt::Display for BxDF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, b => write!(f, "{}", b))
    }
}

macro_rules! from_model {
    ($($variant: ident),+) => {
        $(
            impl From<$variant> for BxDF {
                fn from(b: $variant) -> Self {
                    BxDF::$variant(b)
                }
            }
        )+
    };
}

from_model!(
    DisneyDiffuse,
    DisneyFakeSS,
    LambertianReflection,
    LambertianTransmission,
    MicrofacetReflection,
    MicrofacetTransmission,
    OrenNayar,
    ScaledBxDF,
    SpecularReflection
);

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use proptest::prelude::*;

    fn glass() -> MicrofacetTransmission {
        let d = TrowbridgeReitzDistribution::new(0.3, 0.3, true, false);
        MicrofacetTransmission::new(
            Spectrum::ONE,
            d.into(),
            Fresnel::dielectric(1.0, 1.5),
            1.0,
            1.5,
            TransportMode::Radiance,
        )
    }

    /// One instance of every model, used for contract-wide checks.
    fn all_models() -> Vec<BxDF> {
        let r = Spectrum::from_rgb(0.8, 0.5, 0.2);
        let beckmann = BeckmannDistribution::new(0.4, 0.2, true, false);
        vec![
            LambertianReflection::new(r).into(),
            LambertianTransmission::new(r).into(),
            OrenNayar::new(r, 20.0).into(),
            DisneyDiffuse::new(r).into(),
            DisneyFakeSS::new(r, 0.6).into(),
            MicrofacetReflection::new(r, beckmann.into(), Fresnel::dielectric(1.0, 1.5)).into(),
            glass().into(),
            ScaledBxDF::new(Box::new(BxDF::from(OrenNayar::new(r, 35.0))), Spectrum::new(0.5))
                .into(),
        ]
    }

    /// Models whose `f` is not tied to a transport direction.
    fn reciprocal_models() -> Vec<BxDF> {
        let r = Spectrum::new(0.7);
        let ggx = TrowbridgeReitzDistribution::new(0.3, 0.5, true, false);
        vec![
            LambertianReflection::new(r).into(),
            OrenNayar::new(r, 30.0).into(),
            DisneyDiffuse::new(r).into(),
            DisneyFakeSS::new(r, 0.4).into(),
            MicrofacetReflection::new(r, ggx.into(), Fresnel::NoOp).into(),
        ]
    }

    #[test]
    fn sampled_pdf_matches_pdf() {
        let mut rng = RNG::new(17);
        for bxdf in all_models() {
            for _ in 0..2000 {
                let wo = uniform_sample_hemisphere(&rng.uniform_point2f());
                let wo = if rng.uniform_float() < 0.5 { -wo } else { wo };
                if let Some(s) = bxdf.sample_f(&wo, &rng.uniform_point2f()) {
                    assert!(s.pdf > 0.0);
                    assert_eq!(s.pdf, bxdf.pdf(&wo, &s.wi), "{}", bxdf);
                    assert_eq!(s.wo, wo);
                    assert!(s.f.is_finite() && s.pdf.is_finite(), "{}", bxdf);
                }
            }
        }
    }

    #[test]
    fn grazing_outgoing_direction_cannot_be_sampled() {
        let wo = Vector3f::new(1.0, 0.0, 0.0);
        for bxdf in all_models() {
            assert!(bxdf.sample_f(&wo, &Point2f::new(0.3, 0.7)).is_none(), "{}", bxdf);
        }
    }

    #[test]
    fn subnormal_grazing_pair_is_finite() {
        let wo = Vector3f::new(1.0, 0.0, 1e-40);
        let wi = Vector3f::new(1.0, 0.0, 2e-40);
        for bxdf in all_models() {
            assert!(bxdf.f(&wo, &wi).is_finite(), "{}", bxdf);
            assert!(bxdf.f(&-wo, &-wi).is_finite(), "{}", bxdf);
        }
    }

    #[test]
    fn rho_hd_is_bounded() {
        let mut rng = RNG::new(3);
        let samples = stratified_sample_2d(&mut rng, 64, 64, true);
        let wo = Vector3f::new(0.3, 0.4, 0.866).normalize();
        for bxdf in all_models() {
            let rho = bxdf.rho_hd(&wo, &samples);
            for c in rho.samples() {
                assert!(*c >= 0.0 && *c <= 1.05, "{}: {}", bxdf, rho);
            }
        }
    }

    #[test]
    #[should_panic]
    fn rho_hh_rejects_mismatched_batches() {
        let bxdf = BxDF::from(LambertianReflection::new(Spectrum::ONE));
        let u = [Point2f::new(0.5, 0.5)];
        bxdf.rho_hh(&u, &[]);
    }

    #[test]
    fn empty_batches_estimate_zero() {
        let bxdf = BxDF::from(LambertianReflection::new(Spectrum::ONE));
        assert!(bxdf.rho_hd(&Vector3f::Z_AXIS, &[]).is_black());
        assert!(bxdf.rho_hh(&[], &[]).is_black());
    }

    prop_unit_vector3!(unit_vector3);

    proptest! {
        #[test]
        fn never_produces_nan_or_infinity(
            wo in unit_vector3(),
            wi in unit_vector3(),
            ux in 0.0..1.0f32,
            uy in 0.0..1.0f32,
        ) {
            for bxdf in all_models() {
                let f = bxdf.f(&wo, &wi);
                let pdf = bxdf.pdf(&wo, &wi);
                prop_assert!(f.is_finite() && !f.has_nans(), "{} f = {}", bxdf, f);
                prop_assert!(pdf.is_finite() && pdf >= 0.0, "{} pdf = {}", bxdf, pdf);
                if let Some(s) = bxdf.sample_f(&wo, &Point2f::new(ux, uy)) {
                    prop_assert!(s.f.is_finite() && s.pdf.is_finite());
                    prop_assert!(!s.wi.has_nans());
                }
            }
        }

        #[test]
        fn near_grazing_inputs_are_finite(
            x in -1.0..1.0f32,
            z in -1e-6..1e-6f32,
            wi in unit_vector3(),
        ) {
            let y = max(0.0, 1.0 - x * x - z * z).sqrt();
            let wo = Vector3f::new(x, y, z);
            for bxdf in all_models() {
                prop_assert!(bxdf.f(&wo, &wi).is_finite());
                prop_assert!(bxdf.f(&wi, &wo).is_finite());
                prop_assert!(bxdf.pdf(&wo, &wi).is_finite());
                prop_assert!(bxdf.pdf(&wi, &wo).is_finite());
                if let Some(s) = bxdf.sample_f(&wo, &Point2f::new(0.5 * (x + 1.0), 0.5)) {
                    prop_assert!(s.f.is_finite() && s.pdf.is_finite(), "{}", bxdf);
                }
            }
        }

        #[test]
        fn grazing_pairs_are_finite(
            phi_o in 0.0..TWO_PI,
            phi_i in 0.0..TWO_PI,
            zo in 0.0..1e-6f32,
            zi in 0.0..1e-6f32,
            below in any::<bool>(),
        ) {
            let side = if below { -1.0 } else { 1.0 };
            let wo = Vector3f::new(cos(phi_o), sin(phi_o), side * zo);
            let wi = Vector3f::new(cos(phi_i), sin(phi_i), side * zi);
            for bxdf in all_models() {
                let f = bxdf.f(&wo, &wi);
                prop_assert!(f.is_finite() && !f.has_nans(), "{} f = {}", bxdf, f);
                prop_assert!(bxdf.pdf(&wo, &wi).is_finite());
            }
        }

        #[test]
        fn reflection_is_reciprocal(wo in unit_vector3(), wi in unit_vector3()) {
            for bxdf in reciprocal_models() {
                let a = bxdf.f(&wo, &wi);
                let b = bxdf.f(&wi, &wo);
                for c in 0..3 {
                    let tol = 1e-3 * max(1.0, abs(a[c]));
                    prop_assert!(abs(a[c] - b[c]) <= tol, "{}: {} vs {}", bxdf, a, b);
                }
            }
        }
    }
}
