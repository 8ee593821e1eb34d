//! Application related stuff

use clap::{Parser, ValueEnum};
use scattering::microfacet::*;
use scattering::pbrt::Float;
use scattering::reflection::*;
use scattering::spectrum::*;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// Scattering models the furnace can exercise.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Model {
    Lambertian,
    LambertianTransmission,
    OrenNayar,
    DisneyDiffuse,
    DisneyFakeSs,
    MicrofacetReflection,
    MicrofacetTransmission,
    Specular,
    Scaled,
}

/// Microfacet distributions.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Distribution {
    Beckmann,
    TrowbridgeReitz,
}

/// System wide options.
#[derive(Parser, Clone)]
#[command(author, version, about = "White furnace and consistency checks for BxDFs.", long_about = None)]
pub struct Options {
    /// The scattering model to test.
    #[arg(long, short = 'b', value_enum, default_value_t = Model::Lambertian)]
    pub bxdf: Model,

    /// Microfacet distribution for glossy models.
    #[arg(long, short = 'd', value_enum, default_value_t = Distribution::TrowbridgeReitz)]
    pub distribution: Distribution,

    /// Microfacet roughness.
    #[arg(
        long,
        short = 'r',
        value_name = "FLOAT",
        default_value_t = 0.3,
        help = "Microfacet roughness (alpha unless --remap-roughness is given)."
    )]
    pub roughness: Float,

    /// Treat roughness as a perceptual value in [0, 1].
    #[arg(long = "remap-roughness", help = "Map perceptual roughness in [0, 1] to alpha.")]
    pub remap_roughness: bool,

    /// Oren-Nayar standard deviation of the facet angle.
    #[arg(long, value_name = "DEGREES", default_value_t = 20.0)]
    pub sigma: Float,

    /// Index of refraction on the inside of the surface.
    #[arg(long, value_name = "FLOAT", default_value_t = 1.5)]
    pub eta: Float,

    /// Reflectance or transmittance scale.
    #[arg(long, value_name = "FLOAT", default_value_t = 1.0)]
    pub reflectance: Float,

    /// Number of stratified samples along each axis.
    #[arg(long, short = 'n', value_name = "NUM", default_value_t = 64)]
    pub samples: usize,

    /// Seed for the random number generator.
    #[arg(long, value_name = "NUM", default_value_t = 0)]
    pub seed: u64,

    /// Sample the full microfacet distribution instead of visible normals.
    #[arg(long = "no-visible-area", help = "Sample all microfacet normals, not only visible ones.")]
    pub no_visible_area: bool,
}

impl Options {
    /// Returns the number of stratified samples per axis.
    pub fn samples_per_axis(&self) -> usize {
        if self.samples == 0 {
            warn!("Invalid samples, using 1");
            1
        } else {
            self.samples
        }
    }

    /// Builds the microfacet distribution described by the options.
    pub fn microfacet_distribution(&self) -> MicrofacetModel {
        let alpha = if self.remap_roughness {
            roughness_to_alpha(self.roughness)
        } else {
            self.roughness
        };
        let visible = !self.no_visible_area;
        match self.distribution {
            Distribution::Beckmann => BeckmannDistribution::new(alpha, alpha, visible, false).into(),
            Distribution::TrowbridgeReitz => {
                TrowbridgeReitzDistribution::new(alpha, alpha, visible, false).into()
            }
        }
    }

    /// Builds the `BxDF` described by the options.
    pub fn bxdf(&self) -> Result<BxDF, String> {
        if self.eta.is_nan() || self.eta <= 0.0 {
            return Err(format!("Invalid eta {}, must be positive.", self.eta));
        }
        if self.roughness.is_nan() || self.roughness < 0.0 {
            return Err(format!("Invalid roughness {}.", self.roughness));
        }

        let r = Spectrum::new(self.reflectance);
        let bxdf: BxDF = match self.bxdf {
            Model::Lambertian => LambertianReflection::new(r).into(),
            Model::LambertianTransmission => LambertianTransmission::new(r).into(),
            Model::OrenNayar => OrenNayar::new(r, self.sigma).into(),
            Model::DisneyDiffuse => DisneyDiffuse::new(r).into(),
            Model::DisneyFakeSs => DisneyFakeSS::new(r, self.roughness).into(),
            Model::MicrofacetReflection => MicrofacetReflection::new(
                r,
                self.microfacet_distribution(),
                Fresnel::dielectric(1.0, self.eta),
            )
            .into(),
            Model::MicrofacetTransmission => MicrofacetTransmission::new(
                r,
                self.microfacet_distribution(),
                Fresnel::dielectric(1.0, self.eta),
                1.0,
                self.eta,
                TransportMode::Importance,
            )
            .into(),
            Model::Specular => SpecularReflection::new(r, Fresnel::dielectric(1.0, self.eta)).into(),
            Model::Scaled => ScaledBxDF::new(
                Box::new(BxDF::from(OrenNayar::new(Spectrum::ONE, self.sigma))),
                r,
            )
            .into(),
        };
        Ok(bxdf)
    }
}
