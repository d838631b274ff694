//! Textures

use crate::interaction::SurfaceInteraction;
use std::fmt;
use std::sync::Arc;

mod mapping;
mod slot;

// Re-export
pub use mapping::*;
pub use slot::*;

/// Texture reconstruction filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    /// Nearest texel of the finest level.
    Nearest,

    /// Bilinear interpolation of the finest level.
    Linear,

    /// Bilinear interpolation between the two MIPMap levels selected by the
    /// screen-space footprint.
    TriLinear,
}

impl fmt::Display for TextureFilter {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Linear => write!(f, "linear"),
            Self::TriLinear => write!(f, "trilinear"),
        }
    }
}

/// Texture interface.
pub trait Texture<T: Copy> {
    /// Evaluate the texture at surface interaction.
    ///
    /// * `si`     - Surface interaction.
    /// * `filter` - Reconstruction filter.
    fn evaluate(&self, si: &SurfaceInteraction, filter: TextureFilter) -> T;

    /// Returns the value if the texture does not vary over the surface.
    fn constant_value(&self) -> Option<T> {
        None
    }

    /// Returns the file the texture was loaded from, if any.
    fn source_path(&self) -> Option<&str> {
        None
    }
}

/// Atomic reference counted `Texture`.
pub type ArcTexture<T> = Arc<dyn Texture<T> + Send + Sync>;
