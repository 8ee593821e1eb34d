//! Microfacet Distribution Models

use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;
use std::fmt;

mod beckmann;
mod trowbridge_reitz;

// Re-exports
pub use beckmann::*;
pub use trowbridge_reitz::*;

/// Smallest roughness value accepted by the distributions. Smaller values are
/// floored to avoid the singularity at a perfectly smooth surface.
pub const MIN_ALPHA: Float = 0.001;

/// Interface for microfacet distribution models.
pub trait MicrofacetDistribution {
    /// Returns whether or not the visible area is sampled or not.
    fn sample_visible_area(&self) -> bool;

    /// Returns whether the masking-shadowing term is the product of two
    /// independent Smith `G1` terms rather than the height-correlated form.
    fn separable_masking(&self) -> bool;

    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn d(&self, wh: &Vector3f) -> Float;

    /// Returns the invisible masked microfacet area per visible microfacet area.
    ///
    /// * `w` - The direction from camera/viewer.
    fn lambda(&self, w: &Vector3f) -> Float;

    /// Returns a sample from the distribution of normal vectors.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f;

    /// Evaluates Smith's masking-shadowing function which gives the fraction of
    /// microfacets that are visible from a given direction.
    ///
    /// * `w` - The direction from camera/viewer.
    fn g1(&self, w: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(w))
    }

    /// Returns the fraction of microfacets in a differential area that are
    /// visible from both directions `wo` and `wi`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn g(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if self.separable_masking() {
            self.g1(wo) * self.g1(wi)
        } else {
            1.0 / (1.0 + self.lambda(wo) + self.lambda(wi))
        }
    }

    /// Evaluates the PDF for the given outgoing direction and sampled surface
    /// normal.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        if self.sample_visible_area() {
            let cos_theta_o = abs_cos_theta(wo);
            if cos_theta_o == 0.0 {
                0.0
            } else {
                self.d(wh) * self.g1(wo) * wo.abs_dot(wh) / cos_theta_o
            }
        } else {
            self.d(wh) * abs_cos_theta(wh)
        }
    }
}

/// The closed set of microfacet distributions, dispatched statically.
#[derive(Copy, Clone, Debug)]
pub enum MicrofacetModel {
    Beckmann(BeckmannDistribution),
    TrowbridgeReitz(TrowbridgeReitzDistribution),
}

impl MicrofacetDistribution for MicrofacetModel {
    fn sample_visible_area(&self) -> bool {
        match self {
            Self::Beckmann(d) => d.sample_visible_area(),
            Self::TrowbridgeReitz(d) => d.sample_visible_area(),
        }
    }

    fn separable_masking(&self) -> bool {
        match self {
            Self::Beckmann(d) => d.separable_masking(),
            Self::TrowbridgeReitz(d) => d.separable_masking(),
        }
    }

    fn d(&self, wh: &Vector3f) -> Float {
        match self {
            Self::Beckmann(d) => d.d(wh),
            Self::TrowbridgeReitz(d) => d.d(wh),
        }
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        match self {
            Self::Beckmann(d) => d.lambda(w),
            Self::TrowbridgeReitz(d) => d.lambda(w),
        }
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        match self {
            Self::Beckmann(d) => d.sample_wh(wo, u),
            Self::TrowbridgeReitz(d) => d.sample_wh(wo, u),
        }
    }
}

impl From<BeckmannDistribution> for MicrofacetModel {
    fn from(d: BeckmannDistribution) -> Self {
        Self::Beckmann(d)
    }
}

impl From<TrowbridgeReitzDistribution> for MicrofacetModel {
    fn from(d: TrowbridgeReitzDistribution) -> Self {
        Self::TrowbridgeReitz(d)
    }
}

impl fmt::Display for MicrofacetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beckmann(d) => write!(f, "{}", d),
            Self::TrowbridgeReitz(d) => write!(f, "{}", d),
        }
    }
}

/// Floors a roughness value to `MIN_ALPHA`.
///
/// * `alpha` - The roughness value.
pub(crate) fn floor_alpha(alpha: Float) -> Float {
    if alpha < MIN_ALPHA {
        debug!("Microfacet alpha {} floored to {}", alpha, MIN_ALPHA);
        MIN_ALPHA
    } else {
        alpha
    }
}

/// Samples the azimuth of an anisotropic distribution so the slope density
/// follows the elliptical roughness profile.
///
/// * `alpha_x` - Roughness along the x-axis.
/// * `alpha_y` - Roughness along the y-axis.
/// * `u`       - Uniform random value.
fn anisotropic_phi(alpha_x: Float, alpha_y: Float, u: Float) -> Float {
    let phi = atan(alpha_y / alpha_x * tan(TWO_PI * u + PI_OVER_TWO));
    if u > 0.5 {
        phi + PI
    } else {
        phi
    }
}

/// Samples a normal from the distribution of normals visible from `wo`. The
/// outgoing direction is stretched to the unit-roughness configuration, a
/// slope is drawn with `sample_11`, then rotated and unstretched back.
///
/// * `wo`        - Outgoing direction.
/// * `alpha_x`   - Roughness along the x-axis.
/// * `alpha_y`   - Roughness along the y-axis.
/// * `u`         - The 2D uniform random values.
/// * `sample_11` - Slope sampler for the unit-roughness distribution.
fn sample_visible_normal(
    wo: &Vector3f,
    alpha_x: Float,
    alpha_y: Float,
    u: &Point2f,
    sample_11: fn(Float, &Point2f) -> (Float, Float),
) -> Vector3f {
    let flip = wo.z < 0.0;
    let w = if flip { -*wo } else { *wo };

    let stretched = Vector3f::new(alpha_x * w.x, alpha_y * w.y, w.z).normalize();
    let (sx, sy) = sample_11(cos_theta(&stretched), u);

    let (sin_phi, cos_phi) = (sin_phi(&stretched), cos_phi(&stretched));
    let slope_x = alpha_x * (cos_phi * sx - sin_phi * sy);
    let slope_y = alpha_y * (sin_phi * sx + cos_phi * sy);

    let wh = Vector3f::new(-slope_x, -slope_y, 1.0).normalize();
    if flip {
        -wh
    } else {
        wh
    }
}

/// Maps scalar roughness parameter in [0, 1] to alpha values where
/// values close to 0 are near-perfect specular reflection.
///
/// * `roughness` - Roughness parameter value.
pub fn roughness_to_alpha(roughness: Float) -> Float {
    let roughness = max(roughness, 1e-3);
    let x = roughness.ln();
    1.62142 + 0.819955 * x + 0.1734 * x * x + 0.0171201 * x * x * x + 0.000640711 * x * x * x * x
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::*;
    use crate::sampling::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn models(visible: bool, separable: bool) -> Vec<MicrofacetModel> {
        vec![
            BeckmannDistribution::new(0.3, 0.3, visible, separable).into(),
            BeckmannDistribution::new(0.2, 0.5, visible, separable).into(),
            TrowbridgeReitzDistribution::new(0.3, 0.3, visible, separable).into(),
            TrowbridgeReitzDistribution::new(0.2, 0.5, visible, separable).into(),
        ]
    }

    /// Projected microfacet area integrates to one: ∫ D(wh) cosθh dωh = 1.
    #[test]
    fn projected_area_is_normalized() {
        let mut rng = RNG::new(5);
        let samples = stratified_sample_2d(&mut rng, 256, 256, true);
        for model in models(false, false) {
            let sum: Float = samples
                .iter()
                .map(|u| {
                    let wh = uniform_sample_hemisphere(u);
                    model.d(&wh) * cos_theta(&wh) / uniform_hemisphere_pdf()
                })
                .sum();
            let integral = sum / samples.len() as Float;
            assert!((integral - 1.0).abs() < 0.05, "{}: {}", model, integral);
        }
    }

    #[test]
    fn sampled_normals_face_outgoing_hemisphere() {
        let mut rng = RNG::new(9);
        for visible in [true, false] {
            for model in models(visible, false) {
                for wo in [
                    Vector3f::new(0.3, 0.2, 0.9).normalize(),
                    Vector3f::new(-0.5, 0.1, -0.7).normalize(),
                ] {
                    for _ in 0..200 {
                        let wh = model.sample_wh(&wo, &rng.uniform_point2f());
                        assert!(!wh.has_nans());
                        assert!(approx_eq!(f32, wh.length(), 1.0, epsilon = 1e-3));
                        assert!(wh.z * wo.z > 0.0);
                    }
                }
            }
        }
    }

    /// Moments of a normal distribution used to compare sampled normals
    /// against `pdf`.
    const MOMENTS: [fn(&Vector3f) -> Float; 6] = [
        |_| 1.0,
        |w| w.x,
        |w| w.y,
        |w| w.z,
        |w| w.x * w.x,
        |w| w.y * w.y,
    ];

    /// Returns the mean of each moment over normals drawn with `sample_wh`,
    /// and its integral weighted by `pdf` over the hemisphere of `wo`.
    /// Visible normals are restricted to those facing `wo`.
    fn sampled_and_integrated(
        model: &MicrofacetModel,
        wo: &Vector3f,
    ) -> ([Float; 6], [Float; 6]) {
        let mut rng = RNG::new(41);
        let mut sampled = [0.0; 6];
        let mut integrated = [0.0; 6];

        let drawn = stratified_sample_2d(&mut rng, 128, 128, true);
        for u in drawn.iter() {
            let wh = model.sample_wh(wo, u);
            for (m, g) in sampled.iter_mut().zip(MOMENTS.iter()) {
                *m += g(&wh) / drawn.len() as Float;
            }
        }

        let quadrature = stratified_sample_2d(&mut rng, 256, 256, true);
        for u in quadrature.iter() {
            let mut wh = uniform_sample_hemisphere(u);
            if wo.z < 0.0 {
                wh.z = -wh.z;
            }
            if model.sample_visible_area() && wo.dot(&wh) <= 0.0 {
                continue;
            }
            let weight =
                model.pdf(wo, &wh) / (uniform_hemisphere_pdf() * quadrature.len() as Float);
            for (m, g) in integrated.iter_mut().zip(MOMENTS.iter()) {
                *m += g(&wh) * weight;
            }
        }

        (sampled, integrated)
    }

    #[test]
    fn sampled_normals_follow_pdf() {
        let directions = [
            Vector3f::Z_AXIS,
            Vector3f::new(0.5, 0.3, 0.81).normalize(),
            Vector3f::new(-0.6, 0.2, -0.77).normalize(),
            Vector3f::new(0.1, -0.85, 0.5).normalize(),
        ];
        for visible in [true, false] {
            for model in [
                MicrofacetModel::from(BeckmannDistribution::new(0.4, 0.4, visible, false)),
                BeckmannDistribution::new(0.3, 0.6, visible, false).into(),
                TrowbridgeReitzDistribution::new(0.4, 0.4, visible, false).into(),
                TrowbridgeReitzDistribution::new(0.3, 0.6, visible, false).into(),
            ] {
                for wo in directions.iter() {
                    let (sampled, integrated) = sampled_and_integrated(&model, wo);
                    for i in 0..MOMENTS.len() {
                        assert!(
                            (sampled[i] - integrated[i]).abs() < 0.02,
                            "{} wo = {} moment {}: sampled {} integrated {}",
                            model,
                            wo,
                            i,
                            sampled[i],
                            integrated[i]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn separable_masking_is_product_of_g1() {
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let wi = Vector3f::new(0.0, -0.8, 0.6);
        for model in models(true, true) {
            assert_eq!(model.g(&wo, &wi), model.g1(&wo) * model.g1(&wi));
        }
        for model in models(true, false) {
            let expected = 1.0 / (1.0 + model.lambda(&wo) + model.lambda(&wi));
            assert_eq!(model.g(&wo, &wi), expected);
        }
    }

    #[test]
    fn roughness_to_alpha_is_increasing() {
        let a = roughness_to_alpha(0.1);
        let b = roughness_to_alpha(0.5);
        assert!(a > 0.0 && b > a);
    }

    prop_unit_vector3!(unit_vector3);

    proptest! {
        #[test]
        fn terms_are_finite_and_non_negative(w in unit_vector3(), wh in unit_vector3()) {
            for model in models(true, false) {
                let d = model.d(&wh);
                let l = model.lambda(&w);
                let g1 = model.g1(&w);
                prop_assert!(d.is_finite() && d >= 0.0);
                prop_assert!(l.is_finite() && l >= 0.0);
                prop_assert!((0.0..=1.0).contains(&g1));
                let p = model.pdf(&w, &wh);
                prop_assert!(p.is_finite() && p >= 0.0);
            }
        }
    }
}
