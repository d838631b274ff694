//! Surface Interactions

use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;

/// SurfaceInteraction represents geometry of a particular point on a surface
/// as seen by the scattering functions.
#[derive(Clone, Debug)]
pub struct SurfaceInteraction {
    /// Geometric surface normal.
    pub n: Normal3f,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// Screen-space derivatives of the uv coordinates.
    pub der: Derivatives,

    /// Shading geometry used for perturbed values.
    pub shading: Shading,
}

impl SurfaceInteraction {
    /// Create a new surface interaction. The shading geometry starts out
    /// identical to the geometric one.
    ///
    /// * `n`    - Surface normal.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `uv`   - The uv coordinates from surface parametrization.
    pub fn new(n: Normal3f, dpdu: Vector3f, uv: Point2f) -> Self {
        let n = n.normalize();
        Self {
            n,
            uv,
            der: Derivatives::default(),
            shading: Shading::new(n, dpdu),
        }
    }

    /// Updates the shading geometry.
    ///
    /// * `n`                            - Shading normal.
    /// * `dpdu`                         - Shading ∂p/∂u.
    /// * `orientation_is_authoritative` - Indicates whether the geometric
    ///                                    normal should be flipped to match the
    ///                                    shading normal or vice versa.
    pub fn set_shading_geometry(&mut self, n: Normal3f, dpdu: Vector3f, orientation_is_authoritative: bool) {
        self.shading.n = n.normalize();
        if orientation_is_authoritative {
            self.n = self.n.face_forward(&self.shading.n);
        } else {
            self.shading.n = self.shading.n.face_forward(&self.n);
        }
        self.shading.dpdu = dpdu;
    }

    /// Sets the screen-space uv derivatives used for texture filtering.
    ///
    /// * `dudx` - Differential change ∂u/∂x.
    /// * `dudy` - Differential change ∂u/∂y.
    /// * `dvdx` - Differential change ∂v/∂x.
    /// * `dvdy` - Differential change ∂v/∂y.
    pub fn set_differentials(&mut self, dudx: Float, dudy: Float, dvdx: Float, dvdy: Float) {
        self.der = Derivatives::new(dudx, dudy, dvdx, dvdy);
    }
}

impl Default for SurfaceInteraction {
    /// Returns an interaction on the z = 0 plane with +Z normal, +X tangent and
    /// uv at the center of the unit square.
    fn default() -> Self {
        Self::new(Normal3f::UP, Vector3f::new(1.0, 0.0, 0.0), Point2f::new(0.5, 0.5))
    }
}

impl fmt::Display for SurfaceInteraction {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurfaceInteraction {{ n: {}, uv: {}, der: {}, shading: {} }}",
            self.n, self.uv, self.der, self.shading
        )
    }
}

/// Shading geometry used for perturbed values for bump mapping.
#[derive(Clone, Debug)]
pub struct Shading {
    /// Surface normal.
    pub n: Normal3f,

    /// Parametric partial derivative of the point ∂p/∂u.
    pub dpdu: Vector3f,
}

impl Shading {
    /// Create a new shading struct.
    ///
    /// * `n`    - Surface normal.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    pub fn new(n: Normal3f, dpdu: Vector3f) -> Self {
        Self { n, dpdu }
    }
}

impl fmt::Display for Shading {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shading {{ n: {}, dpdu: {} }}", self.n, self.dpdu)
    }
}

/// Surface interaction derivatives.
#[derive(Copy, Clone, Debug, Default)]
pub struct Derivatives {
    /// Differential change ∂u/∂x in parameteric coordinate u as we move along x.
    pub dudx: Float,

    /// Differential change ∂u/∂y in parameteric coordinate u as we move along y.
    pub dudy: Float,

    /// Differential change ∂v/∂x in parameteric coordinate v as we move along x.
    pub dvdx: Float,

    /// Differential change ∂v/∂y in parameteric coordinate v as we move along y.
    pub dvdy: Float,
}

impl Derivatives {
    /// Create a new derivatives struct.
    ///
    /// * `dudx` - Differential change ∂u/∂x in parameteric coordinate u as we move along x.
    /// * `dudy` - Differential change ∂u/∂y in parameteric coordinate u as we move along y.
    /// * `dvdx` - Differential change ∂v/∂x in parameteric coordinate v as we move along x.
    /// * `dvdy` - Differential change ∂v/∂y in parameteric coordinate v as we move along y.
    pub fn new(dudx: Float, dudy: Float, dvdx: Float, dvdy: Float) -> Self {
        Self { dudx, dudy, dvdx, dvdy }
    }

    /// Returns the longest screen-space footprint edge in uv space.
    pub fn max_width(&self) -> Float {
        max(
            max(abs(self.dudx), abs(self.dvdx)),
            max(abs(self.dudy), abs(self.dvdy)),
        )
    }
}

impl fmt::Display for Derivatives {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Derivatives {{ dudx: {}, dudy: {}, dvdx: {}, dvdy: {} }}",
            self.dudx, self.dudy, self.dvdx, self.dvdy
        )
    }
}
