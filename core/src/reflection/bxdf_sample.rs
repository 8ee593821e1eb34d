//! BxDF Sample

use super::*;

/// Result of importance sampling a BxDF or BSDF.
#[derive(Copy, Clone, Debug, Default)]
pub struct BxDFSample {
    /// Value of the distribution function for the sampled pair of directions.
    pub f: Spectrum,

    /// Probability density of the sampled incident direction.
    pub pdf: Float,

    /// The sampled incident direction.
    pub wi: Vector3f,

    /// The outgoing direction the sample was drawn for.
    pub wo: Vector3f,

    /// Flags of the component that produced the sample.
    pub bxdf_type: BxDFType,
}

impl BxDFSample {
    /// Create a new `BxDFSample`.
    ///
    /// * `f`         - Value of the distribution function.
    /// * `pdf`       - Probability density of `wi`.
    /// * `wi`        - The sampled incident direction.
    /// * `wo`        - The outgoing direction.
    /// * `bxdf_type` - Flags of the sampled component.
    pub fn new(f: Spectrum, pdf: Float, wi: Vector3f, wo: Vector3f, bxdf_type: BxDFType) -> Self {
        Self {
            f,
            pdf,
            wi,
            wo,
            bxdf_type,
        }
    }

    /// Returns the sample only if it carries a positive density.
    pub(crate) fn non_zero(self) -> Option<Self> {
        if self.pdf > 0.0 {
            Some(self)
        } else {
            None
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
