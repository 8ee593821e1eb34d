//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of scattering categories: the hemisphere light
    /// leaves into and the lobe shape.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BxDFType: u8 {
        const BSDF_REFLECTION = 1;
        const BSDF_TRANSMISSION = 2;
        const BSDF_DIFFUSE = 4;
        const BSDF_GLOSSY = 8;
        const BSDF_SPECULAR = 16;
        const BSDF_ALL = Self::BSDF_REFLECTION.bits()
            | Self::BSDF_TRANSMISSION.bits()
            | Self::BSDF_DIFFUSE.bits()
            | Self::BSDF_GLOSSY.bits()
            | Self::BSDF_SPECULAR.bits();
    }
}

impl Default for BxDFType {
    fn default() -> Self {
        Self::empty()
    }
}

impl BxDFType {
    /// Returns true if every flag of this type is present in `filter`.
    ///
    /// * `filter` - The flags to match against.
    pub fn matches(&self, filter: Self) -> bool {
        filter.contains(*self)
    }

    /// Returns true if the specular flag is set.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::BSDF_SPECULAR)
    }

    /// Returns true if the reflection flag is set.
    pub fn is_reflection(&self) -> bool {
        self.contains(Self::BSDF_REFLECTION)
    }

    /// Returns true if the transmission flag is set.
    pub fn is_transmission(&self) -> bool {
        self.contains(Self::BSDF_TRANSMISSION)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
