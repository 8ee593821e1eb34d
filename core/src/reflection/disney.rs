//! Disney Diffuse Lobes

use super::*;

/// Diffuse base lobe of the Disney principled BRDF. Lambertian reflection
/// darkened toward grazing angles by a Schlick-weighted diffuse Fresnel
/// factor that goes from 1 at normal incidence to 0.5 at grazing.
#[derive(Copy, Clone, Debug)]
pub struct DisneyDiffuse {
    /// Base reflectance.
    r: Spectrum,
}

impl DisneyDiffuse {
    /// Create a new instance of `DisneyDiffuse`.
    ///
    /// * `r` - Base reflectance.
    pub fn new(r: Spectrum) -> Self {
        Self { r }
    }
}

impl BxDFModel for DisneyDiffuse {
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }

        let fo = schlick_weight(abs_cos_theta(wo));
        let fi = schlick_weight(abs_cos_theta(wi));
        self.r * INV_PI * (1.0 - fo / 2.0) * (1.0 - fi / 2.0)
    }
}

impl fmt::Display for DisneyDiffuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ DisneyDiffuse r: {} ]", self.r)
    }
}

/// Hanrahan-Krueger inspired approximation of subsurface scattering used by
/// the Disney BRDF in place of a volumetric model. Flattens retroreflection
/// as roughness grows.
#[derive(Copy, Clone, Debug)]
pub struct DisneyFakeSS {
    /// Base reflectance.
    r: Spectrum,

    /// Surface roughness in [0, 1].
    roughness: Float,
}

impl DisneyFakeSS {
    /// Create a new instance of `DisneyFakeSS`.
    ///
    /// * `r`         - Base reflectance.
    /// * `roughness` - Surface roughness in [0, 1].
    pub fn new(r: Spectrum, roughness: Float) -> Self {
        Self { r, roughness }
    }
}

impl BxDFModel for DisneyFakeSS {
    // Reported as diffuse reflection so it is sampled and filtered with the
    // diffuse lobes.
    fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }

        // 1 / (cos θo + cos θi) is unbounded at grazing.
        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        if cos_theta_o < MIN_COS_THETA || cos_theta_i < MIN_COS_THETA {
            return Spectrum::ZERO;
        }

        let wh = *wi + *wo;
        if wh.length_squared() == 0.0 {
            return Spectrum::ZERO;
        }
        let wh = wh.normalize();
        let cos_theta_d = wi.dot(&wh);

        let fss90 = cos_theta_d * cos_theta_d * self.roughness;
        let fo = schlick_weight(cos_theta_o);
        let fi = schlick_weight(cos_theta_i);
        let fss = lerp(fo, 1.0, fss90) * lerp(fi, 1.0, fss90);

        // 1.25 roughly preserves albedo.
        let ss = 1.25 * (fss * (1.0 / (cos_theta_o + cos_theta_i) - 0.5) + 0.5);
        self.r * INV_PI * ss
    }
}

impl fmt::Display for DisneyFakeSS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ DisneyFakeSS r: {} roughness: {} ]",
            self.r, self.roughness
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
