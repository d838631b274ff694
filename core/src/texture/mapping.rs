//! 2D (u, v) Mapping

use crate::geometry::*;
use crate::interaction::SurfaceInteraction;
use crate::pbrt::*;

/// Stores the result of 2D texture mapping.
#[derive(Copy, Clone, Debug, Default)]
pub struct TextureMap2DResult {
    /// Texture mapped point.
    pub p: Point2f,

    /// Texture differential of (s, t) with respect to x, (∂s/∂x, ∂t/∂x).
    pub dstdx: Vector2f,

    /// Texture differential of (s, t) with respect to y, (∂s/∂y, ∂t/∂y).
    pub dstdy: Vector2f,
}

impl TextureMap2DResult {
    /// Create a new `TextureMap2DResult`.
    ///
    /// * `p`      - Texture mapped point.
    /// * `dstdx`  - Texture differential of (s, t) with respect to x, (∂s/∂x, ∂t/∂x).
    /// * `dstdy`  - Texture differential of (s, t) with respect to y, (∂s/∂y, ∂t/∂y).
    pub fn new(p: Point2f, dstdx: Vector2f, dstdy: Vector2f) -> Self {
        Self { p, dstdx, dstdy }
    }

    /// Returns the width of a square filter covering the footprint.
    pub fn filter_width(&self) -> Float {
        max(self.dstdx.max_abs_component(), self.dstdy.max_abs_component())
    }
}

/// Implements 2D (u, v) mapping.
#[derive(Copy, Clone, Debug)]
pub struct UVMapping2D {
    /// Scale `u`.
    su: Float,

    /// Scale `v`.
    sv: Float,

    /// Shift `u`.
    du: Float,

    /// Shift `v`.
    dv: Float,
}

impl UVMapping2D {
    /// Create a new `UVMapping2D` with scale and shift values.
    ///
    /// * `su` - Scale `u`.
    /// * `sv` - Scale `v`.
    /// * `du` - Shift `u`.
    /// * `dv` - Shift `v`.
    pub fn new(su: Float, sv: Float, du: Float, dv: Float) -> Self {
        Self { su, sv, du, dv }
    }

    /// Returns the (s, t) texture coordinates and texture differentials.
    ///
    /// * `si` - The surface interaction.
    pub fn map(&self, si: &SurfaceInteraction) -> TextureMap2DResult {
        let dstdx = Vector2f::new(self.su * si.der.dudx, self.sv * si.der.dvdx);
        let dstdy = Vector2f::new(self.su * si.der.dudy, self.sv * si.der.dvdy);
        let p = Point2f::new(self.su * si.uv[0] + self.du, self.sv * si.uv[1] + self.dv);
        TextureMap2DResult::new(p, dstdx, dstdy)
    }
}

impl Default for UVMapping2D {
    /// Returns a default value for `UVMapping2D` with no scaling or shifting.
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }
}
