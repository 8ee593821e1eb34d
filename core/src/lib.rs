//! Surface scattering core: BxDFs, microfacet distributions and the BSDF
//! aggregate used by path tracing integrators.

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
#[macro_use]
pub mod geometry;
pub mod interaction;
pub mod microfacet;
pub mod pbrt;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod spectrum;
