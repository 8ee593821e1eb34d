//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Scattering magnitudes are carried as linear RGB triples.
pub type Spectrum = RGBSpectrum;

/// Number of samples used in `Spectrum`.
pub const SPECTRUM_SAMPLES: usize = RGB_SAMPLES;
