//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

mod bxdf_sample;
mod bxdf_type;
mod common;
mod frame;
mod fresnel;

// Re-export
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use frame::*;
pub use fresnel::*;
