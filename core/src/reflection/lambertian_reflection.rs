//! Lambertian Reflection

use super::*;

/// BRDF for perfectly diffuse surfaces that scatter incident illumination
/// equally in all directions of the reflected hemisphere.
#[derive(Copy, Clone, Debug)]
pub struct LambertianReflection {
    /// Fraction of incident light that is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Create a new instance of `LambertianReflection`.
    ///
    /// * `r` - Fraction of incident light that is scattered.
    pub fn new(r: Spectrum) -> Self {
        Self { r }
    }
}

impl BxDFModel for LambertianReflection {
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if same_hemisphere(wo, wi) {
            self.r * INV_PI
        } else {
            Spectrum::ZERO
        }
    }
}

impl fmt::Display for LambertianReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ LambertianReflection r: {} ]", self.r)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
