//! Materials

#[macro_use]
extern crate log;

mod bsdf;
mod rough_dielectric;

// Re-export
pub use bsdf::*;
pub use rough_dielectric::*;
