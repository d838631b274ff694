//! Constant Texture

use dielectric_core::interaction::*;
use dielectric_core::texture::*;
use std::sync::Arc;

/// Implements a texture that returns the same value everywhere.
#[derive(Clone)]
pub struct ConstantTexture<T> {
    /// The texture value.
    value: T,
}

impl<T> ConstantTexture<T> {
    /// Create a new `ConstantTexture<T>`.
    ///
    /// * `value` - The texture value.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> ConstantTexture<T>
where
    T: Copy + Send + Sync + 'static,
{
    /// Create a new `ConstantTexture<T>` behind an `ArcTexture<T>`.
    ///
    /// * `value` - The texture value.
    pub fn arc(value: T) -> ArcTexture<T> {
        Arc::new(Self::new(value))
    }
}

impl<T> Texture<T> for ConstantTexture<T>
where
    T: Copy,
{
    /// Evaluate the texture at surface interaction.
    ///
    /// * `_si`     - Surface interaction.
    /// * `_filter` - Reconstruction filter.
    fn evaluate(&self, _si: &SurfaceInteraction, _filter: TextureFilter) -> T {
        self.value
    }

    /// Returns the texture value.
    fn constant_value(&self) -> Option<T> {
        Some(self.value)
    }
}
