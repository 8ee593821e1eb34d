//! Scaled BxDF

use super::*;

/// Adapter that scales the contribution of another BxDF by a `Spectrum`, used
/// to weight lobes for energy conservation. Sampling densities are not
/// affected.
#[derive(Clone, Debug)]
pub struct ScaledBxDF<B: BxDFModel = Box<BxDF>> {
    /// The BxDF to scale.
    bxdf: B,

    /// Scaling value.
    scale: Spectrum,
}

impl<B: BxDFModel> ScaledBxDF<B> {
    /// Create a new instance of `ScaledBxDF`.
    ///
    /// * `bxdf`  - The BxDF to scale.
    /// * `scale` - Scaling value.
    pub fn new(bxdf: B, scale: Spectrum) -> Self {
        Self { bxdf, scale }
    }

    /// Returns the wrapped BxDF.
    pub fn inner(&self) -> &B {
        &self.bxdf
    }
}

impl<B: BxDFModel> BxDFModel for ScaledBxDF<B> {
    fn get_type(&self) -> BxDFType {
        self.bxdf.get_type()
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        self.scale * self.bxdf.f(wo, wi)
    }

    fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> Option<BxDFSample> {
        self.bxdf.sample_f(wo, u).map(|mut sample| {
            sample.f = self.scale * sample.f;
            sample
        })
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.bxdf.pdf(wo, wi)
    }

    fn rho_hd(&self, wo: &Vector3f, samples: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hd(wo, samples)
    }

    fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hh(samples1, samples2)
    }
}

impl<B: BxDFModel + fmt::Display> fmt::Display for ScaledBxDF<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ScaledBxDF bxdf: {} scale: {} ]", self.bxdf, self.scale)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
