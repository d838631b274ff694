//! Microfacet Distribution Models

use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

mod trowbridge_reitz;

// Re-exports
pub use trowbridge_reitz::*;

/// Interface for microfacet distribution models.
pub trait MicrofacetDistribution {
    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn d(&self, wh: &Vector3f) -> Float;

    /// Returns the invisible masked microfacet area per visible microfacet area.
    ///
    /// * `w` - The direction from camera/viewer.
    fn lambda(&self, w: &Vector3f) -> Float;

    /// Evaluates Smith's masking-shadowing function which gives the fraction of
    /// microfacets with normal `wh` that are visible from direction `w`. A
    /// microfacet seen from its back side is never visible.
    ///
    /// * `w`  - The direction from camera/viewer.
    /// * `wh` - The microfacet normal.
    fn g1(&self, w: &Vector3f, wh: &Vector3f) -> Float {
        if w.dot(wh) * cos_theta(w) <= 0.0 {
            0.0
        } else {
            1.0 / (1.0 + self.lambda(w))
        }
    }

    /// Returns the fraction of microfacets with normal `wh` in a differential
    /// area that are visible from both directions `wo` and `wi`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    /// * `wh` - The microfacet normal.
    fn g(&self, wo: &Vector3f, wi: &Vector3f, wh: &Vector3f) -> Float {
        self.g1(wo, wh) * self.g1(wi, wh)
    }

    /// Returns a sample from the distribution of normals visible from `wo`.
    ///
    /// * `wo` - Outgoing direction in the upper hemisphere.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f;

    /// Evaluates the PDF of `sample_wh()` for the given outgoing direction and
    /// sampled surface normal.
    ///
    /// * `wo` - Outgoing direction in the upper hemisphere.
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        let cos_o = cos_theta(wo);
        if cos_o <= 0.0 {
            0.0
        } else {
            self.d(wh) * self.g1(wo, wh) * max(0.0, wo.dot(wh)) / cos_o
        }
    }
}
