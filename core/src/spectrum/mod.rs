//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Use `RGBSpectrum` for shading.
pub type Spectrum = RGBSpectrum;
