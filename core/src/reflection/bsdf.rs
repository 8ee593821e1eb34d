//! BSDF

use super::*;
use crate::interaction::*;

/// Maximum number of BxDFs that can be stored in `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// BSDF interface represents a collection of BRDFs and BTDFs.
#[derive(Clone)]
pub struct BSDF {
    /// Relative index of refraction over the surface boundary.
    pub eta: Float,

    /// The shading normal given by per-vertex normals and/or bump mapping.
    /// It is the third axis of the local shading frame and defines the
    /// hemispheres every `BxDF` works in.
    pub ns: Normal3f,

    /// The geometric normal defined by surface geometry. Used to classify a
    /// pair of world-space directions as reflection or transmission.
    pub ng: Normal3f,

    /// First axis of the local shading frame.
    pub ss: Vector3f,

    /// Second axis of the local shading frame.
    pub ts: Vector3f,

    bxdfs: Vec<BxDF>,
}

impl BSDF {
    /// Creates a new `BSDF` for a point on a surface.
    ///
    /// * `si`  - The differential geometry at the point on a surface.
    /// * `eta` - Optional relative index of refraction over the surface
    ///           boundary. If not provided, defaults to 1.0; used for
    ///           opaque surfaces.
    pub fn new(si: &SurfaceInteraction, eta: Option<Float>) -> Self {
        let ns = si.shading.n;
        let (ss, ts) = shading_frame(&Vector3f::from(ns), &si.shading.dpdu);
        Self {
            eta: eta.unwrap_or(1.0),
            ns,
            ng: si.n,
            ss,
            ts,
            bxdfs: Vec::with_capacity(MAX_BXDFS),
        }
    }

    /// Creates a new `BSDF` with an arbitrary tangent frame around a normal
    /// that serves as both the shading and geometric normal.
    ///
    /// * `n`   - Unit surface normal.
    /// * `eta` - Optional relative index of refraction (default 1.0).
    pub fn from_normal(n: &Normal3f, eta: Option<Float>) -> Self {
        let (ss, ts) = coordinate_system(&Vector3f::from(*n));
        Self {
            eta: eta.unwrap_or(1.0),
            ns: *n,
            ng: *n,
            ss,
            ts,
            bxdfs: Vec::with_capacity(MAX_BXDFS),
        }
    }

    /// Add a `BxDF`.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn add<B: Into<BxDF>>(&mut self, bxdf: B) {
        assert!(
            self.bxdfs.len() < MAX_BXDFS,
            "Cannot add BxDFs. BSDF maximum limit {} reached.",
            MAX_BXDFS
        );
        self.bxdfs.push(bxdf.into());
    }

    /// Returns the `BxDF`s in the order they were added.
    pub fn bxdfs(&self) -> &[BxDF] {
        &self.bxdfs
    }

    /// Returns the number of `BxDF`s that match the given type.
    ///
    /// * `flags` - The `BxDFType` to match (usually `BSDF_ALL`).
    pub fn num_components(&self, flags: BxDFType) -> usize {
        self.matching(flags).count()
    }

    /// Returns the number of `BxDF`s that are (or are not) perfectly
    /// specular.
    ///
    /// * `specular` - Whether to count specular or non-specular lobes.
    pub fn num_components_by_specularity(&self, specular: bool) -> usize {
        self.bxdfs
            .iter()
            .filter(|b| b.get_type().is_specular() == specular)
            .count()
    }

    /// Transforms a vector from world space to the local shading frame.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        renormalize(Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns)))
    }

    /// Transforms a vector from the local shading frame to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        renormalize(Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        ))
    }

    /// Returns the BSDF evaluated for a pair of directions.
    ///
    /// * `wo_w`  - Outgoing direction in world-space.
    /// * `wi_w`  - Incident direction in world-space.
    /// * `flags` - The `BxDFType` to evaluate.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, flags: BxDFType) -> Spectrum {
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }
        let wi = self.world_to_local(wi_w);
        self.f_local(&wo, &wi, self.is_reflection(wo_w, wi_w), flags)
    }

    /// Samples an incident direction from one of the matching `BxDF`s and
    /// returns the combined value and mixture density of every matching
    /// `BxDF` for it. Returns `None` if nothing matches `flags` or the
    /// chosen `BxDF` produced no direction.
    ///
    /// * `wo_w`  - Outgoing direction in world-space.
    /// * `u`     - The 2D uniform random values.
    /// * `flags` - The `BxDFType` to sample.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f, flags: BxDFType) -> Option<BxDFSample> {
        // Choose which `BxDF` to sample.
        let matching_comps = self.num_components(flags);
        if matching_comps == 0 {
            return None;
        }
        let n = matching_comps as Float;
        let comp = min((u[0] * n).floor() as usize, matching_comps - 1);
        let (chosen, bxdf) = self
            .bxdfs
            .iter()
            .enumerate()
            .filter(|(_, b)| b.matches_flags(flags))
            .nth(comp)?;

        // Remap BxDF sample `u` to `[0,1)^2`.
        let u_remapped = Point2f::new(min(u[0] * n - comp as Float, ONE_MINUS_EPSILON), u[1]);

        // Sample chosen `BxDF`.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return None;
        }
        let sample = bxdf.sample_f(&wo, &u_remapped)?.non_zero()?;
        let sampled_type = bxdf.get_type();
        let wi_w = self.local_to_world(&sample.wi);

        // Compute overall PDF with all matching BxDFs.
        let mut pdf = sample.pdf;
        if !sampled_type.is_specular() && matching_comps > 1 {
            for (i, b) in self.bxdfs.iter().enumerate() {
                if i != chosen && b.matches_flags(flags) {
                    pdf += b.pdf(&wo, &sample.wi);
                }
            }
        }
        if matching_comps > 1 {
            pdf /= n;
        }

        // Compute value of BSDF for sampled direction.
        let f = if sampled_type.is_specular() {
            sample.f
        } else {
            self.f_local(&wo, &sample.wi, self.is_reflection(wo_w, &wi_w), flags)
        };

        Some(BxDFSample::new(f, pdf, wi_w, *wo_w, sampled_type))
    }

    /// Evaluates the mixture PDF of the matching `BxDF`s. Returns 0 when
    /// nothing matches or the outgoing direction is tangent to the surface.
    ///
    /// * `wo_w`  - Outgoing direction in world-space.
    /// * `wi_w`  - Incident direction in world-space.
    /// * `flags` - The `BxDFType` to evaluate.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, flags: BxDFType) -> Float {
        if self.bxdfs.is_empty() {
            return 0.0;
        }

        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return 0.0;
        }
        let wi = self.world_to_local(wi_w);

        let (matching_comps, pdf) = self
            .matching(flags)
            .fold((0_usize, 0.0), |(count, pdf), b| {
                (count + 1, pdf + b.pdf(&wo, &wi))
            });
        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo_w`    - Outgoing direction in world-space.
    /// * `samples` - Samples used by Monte Carlo algorithm.
    /// * `flags`   - The `BxDFType` to evaluate.
    pub fn rho_hd(&self, wo_w: &Vector3f, samples: &[Point2f], flags: BxDFType) -> Spectrum {
        let wo = self.world_to_local(wo_w);
        self.matching(flags)
            .fold(Spectrum::ZERO, |rho, b| rho + b.rho_hd(&wo, samples))
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `samples1` - Samples used to pick outgoing directions.
    /// * `samples2` - Samples used to pick incident directions.
    /// * `flags`    - The `BxDFType` to evaluate.
    pub fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f], flags: BxDFType) -> Spectrum {
        self.matching(flags)
            .fold(Spectrum::ZERO, |rho, b| rho + b.rho_hh(samples1, samples2))
    }

    fn matching(&self, flags: BxDFType) -> impl Iterator<Item = &BxDF> {
        self.bxdfs.iter().filter(move |b| b.matches_flags(flags))
    }

    /// Directions on the same side of the geometric normal form a reflection
    /// pair. Classifying against the shading normal instead would let
    /// light leak through surfaces with bump or normal mapping.
    fn is_reflection(&self, wo_w: &Vector3f, wi_w: &Vector3f) -> bool {
        wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0
    }

    /// Sums the matching `BxDF`s that can scatter in the given mode.
    fn f_local(&self, wo: &Vector3f, wi: &Vector3f, reflect: bool, flags: BxDFType) -> Spectrum {
        self.matching(flags)
            .filter(|b| {
                let t = b.get_type();
                (reflect && t.is_reflection()) || (!reflect && t.is_transmission())
            })
            .fold(Spectrum::ZERO, |f, b| f + b.f(wo, wi))
    }
}

impl fmt::Display for BSDF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ BSDF eta: {} nBxDFs: {} ns: {} ss: {} ts: {}",
            self.eta,
            self.bxdfs.len(),
            Vector3f::from(self.ns),
            self.ss,
            self.ts
        )?;
        for b in self.bxdfs.iter() {
            write!(f, " bxdf: {}", b)?;
        }
        write!(f, " ]")
    }
}

/// Returns the tangent `ss` and bitangent `ts` completing an orthonormal
/// frame around `n`. `ss` follows `dpdu` projected onto the tangent plane.
fn shading_frame(n: &Vector3f, dpdu: &Vector3f) -> (Vector3f, Vector3f) {
    let tangent = *dpdu - *n * dpdu.dot(n);
    if tangent.length_squared() > 0.0 {
        let ss = tangent.normalize();
        (ss, n.cross(&ss))
    } else {
        warn!("Shading dpdu {} is parallel to normal {}, using arbitrary frame", dpdu, n);
        coordinate_system(n)
    }
}

fn renormalize(v: Vector3f) -> Vector3f {
    if v.length_squared() > 0.0 {
        v.normalize()
    } else {
        v
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
