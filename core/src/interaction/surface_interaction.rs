//! Surface Interaction

use super::*;

/// Local differential geometry at a point on a surface, from which a `BSDF`
/// derives its shading frame.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceInteraction {
    /// Geometric surface normal.
    pub n: Normal3f,

    /// Shading geometry, possibly perturbed by bump or normal mapping.
    pub shading: Shading,
}

impl SurfaceInteraction {
    /// Create a new surface interaction from the parametric partial
    /// derivatives. The shading geometry starts out equal to the true
    /// geometry.
    ///
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `dpdv` - Parametric partial derivative of the point ∂p/∂v.
    pub fn new(dpdu: Vector3f, dpdv: Vector3f) -> Self {
        let n = Normal3f::from(dpdu.cross(&dpdv).normalize());
        Self {
            n,
            shading: Shading { n, dpdu, dpdv },
        }
    }

    /// Updates the shading geometry. The shading normal is flipped to the
    /// side of the geometric normal unless its orientation is authoritative,
    /// in which case the geometric normal is flipped instead.
    ///
    /// * `dpdu`                         - Shading ∂p/∂u.
    /// * `dpdv`                         - Shading ∂p/∂v.
    /// * `orientation_is_authoritative` - Whether the shading normal wins.
    pub fn set_shading_geometry(
        &mut self,
        dpdu: Vector3f,
        dpdv: Vector3f,
        orientation_is_authoritative: bool,
    ) {
        let mut ns = Normal3f::from(dpdu.cross(&dpdv)).normalize();
        if orientation_is_authoritative {
            self.n = self.n.face_forward(&ns);
        } else {
            ns = ns.face_forward(&self.n);
        }
        self.shading = Shading { n: ns, dpdu, dpdv };
    }
}

/// Shading geometry used for perturbed values from bump or normal mapping.
#[derive(Copy, Clone, Debug)]
pub struct Shading {
    /// Shading normal.
    pub n: Normal3f,

    /// Shading ∂p/∂u.
    pub dpdu: Vector3f,

    /// Shading ∂p/∂v.
    pub dpdv: Vector3f,
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_from_partial_derivatives() {
        let si = SurfaceInteraction::new(Vector3f::new(2.0, 0.0, 0.0), Vector3f::new(0.0, 3.0, 0.0));
        assert_eq!(si.n, Normal3f::new(0.0, 0.0, 1.0));
        assert_eq!(si.shading.n, si.n);
    }

    #[test]
    fn shading_normal_follows_geometry() {
        let mut si =
            SurfaceInteraction::new(Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));
        si.set_shading_geometry(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), false);
        assert_eq!(si.shading.n, Normal3f::new(0.0, 0.0, 1.0));
        assert_eq!(si.n, Normal3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn authoritative_shading_flips_geometry() {
        let mut si =
            SurfaceInteraction::new(Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));
        si.set_shading_geometry(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), true);
        assert_eq!(si.shading.n, Normal3f::new(0.0, 0.0, -1.0));
        assert_eq!(si.n, Normal3f::new(0.0, 0.0, -1.0));
    }
}
