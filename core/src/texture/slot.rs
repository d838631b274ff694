//! Texture Slots

use super::*;
use arc_swap::{ArcSwap, ArcSwapOption};

/// An owned, replaceable texture. Readers always see either the old or the
/// new texture; the old one is released once the last reader drops it.
pub struct TextureSlot<T: Copy> {
    texture: ArcSwap<ArcTexture<T>>,
}

impl<T: Copy> TextureSlot<T> {
    /// Create a new `TextureSlot`.
    ///
    /// * `texture` - The initial texture.
    pub fn new(texture: ArcTexture<T>) -> Self {
        Self {
            texture: ArcSwap::from_pointee(texture),
        }
    }

    /// Evaluate the current texture.
    ///
    /// * `si`     - Surface interaction.
    /// * `filter` - Reconstruction filter.
    #[inline]
    pub fn evaluate(&self, si: &SurfaceInteraction, filter: TextureFilter) -> T {
        self.texture.load().evaluate(si, filter)
    }

    /// Returns the current texture.
    pub fn get(&self) -> ArcTexture<T> {
        ArcTexture::clone(&self.texture.load())
    }

    /// Replaces the texture and returns the previous one.
    ///
    /// * `texture` - The new texture.
    pub fn replace(&self, texture: ArcTexture<T>) -> ArcTexture<T> {
        let old = self.texture.swap(Arc::new(texture));
        ArcTexture::clone(&old)
    }
}

/// An owned, replaceable texture that may be absent.
pub struct OptionTextureSlot<T: Copy> {
    texture: ArcSwapOption<ArcTexture<T>>,
}

impl<T: Copy> OptionTextureSlot<T> {
    /// Create a new `OptionTextureSlot`.
    ///
    /// * `texture` - The initial texture.
    pub fn new(texture: Option<ArcTexture<T>>) -> Self {
        Self {
            texture: ArcSwapOption::new(texture.map(Arc::new)),
        }
    }

    /// Create an empty `OptionTextureSlot`.
    pub fn empty() -> Self {
        Self {
            texture: ArcSwapOption::const_empty(),
        }
    }

    /// Evaluate the current texture if one is installed.
    ///
    /// * `si`     - Surface interaction.
    /// * `filter` - Reconstruction filter.
    #[inline]
    pub fn evaluate(&self, si: &SurfaceInteraction, filter: TextureFilter) -> Option<T> {
        self.texture.load().as_ref().map(|t| t.evaluate(si, filter))
    }

    /// Returns the current texture.
    pub fn get(&self) -> Option<ArcTexture<T>> {
        self.texture.load_full().map(|t| ArcTexture::clone(&t))
    }

    /// Returns true if a texture is installed.
    pub fn is_some(&self) -> bool {
        self.texture.load().is_some()
    }

    /// Replaces the texture and returns the previous one.
    ///
    /// * `texture` - The new texture or `None` to clear the slot.
    pub fn replace(&self, texture: Option<ArcTexture<T>>) -> Option<ArcTexture<T>> {
        self.texture
            .swap(texture.map(Arc::new))
            .map(|old| ArcTexture::clone(&old))
    }
}

impl<T: Copy> Default for OptionTextureSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::Float;

    struct Fixed(Float);

    impl Texture<Float> for Fixed {
        fn evaluate(&self, _si: &SurfaceInteraction, _filter: TextureFilter) -> Float {
            self.0
        }

        fn constant_value(&self) -> Option<Float> {
            Some(self.0)
        }
    }

    #[test]
    fn replace_returns_previous() {
        let si = SurfaceInteraction::default();
        let slot = TextureSlot::new(Arc::new(Fixed(0.25)));
        assert_eq!(slot.evaluate(&si, TextureFilter::Linear), 0.25);

        let old = slot.replace(Arc::new(Fixed(0.75)));
        assert_eq!(old.constant_value(), Some(0.25));
        assert_eq!(slot.evaluate(&si, TextureFilter::Linear), 0.75);
        assert_eq!(slot.get().constant_value(), Some(0.75));
    }

    #[test]
    fn previous_texture_is_released() {
        let slot = TextureSlot::new(Arc::new(Fixed(0.25)));
        let first = slot.get();
        assert!(Arc::strong_count(&first) >= 2);

        drop(slot.replace(Arc::new(Fixed(0.5))));
        assert_eq!(Arc::strong_count(&first), 1);
    }

    #[test]
    fn optional_slot() {
        let si = SurfaceInteraction::default();
        let slot: OptionTextureSlot<Float> = OptionTextureSlot::empty();
        assert!(!slot.is_some());
        assert_eq!(slot.evaluate(&si, TextureFilter::TriLinear), None);

        assert!(slot.replace(Some(Arc::new(Fixed(0.5)))).is_none());
        assert!(slot.is_some());
        assert_eq!(slot.evaluate(&si, TextureFilter::TriLinear), Some(0.5));

        let old = slot.replace(None);
        assert_eq!(old.and_then(|t| t.constant_value()), Some(0.5));
        assert!(slot.get().is_none());
    }
}
