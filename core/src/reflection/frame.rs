//! Shading Frame

use super::*;
use crate::interaction::SurfaceInteraction;

/// Orthonormal shading coordinate system. Local directions have their z
/// component along the shading normal.
#[derive(Copy, Clone, Debug)]
pub struct ShadingFrame {
    /// The shading normal. Third axis of the coordinate system.
    pub ns: Normal3f,

    /// First axis of the coordinate system.
    pub ss: Vector3f,

    /// Second axis of the coordinate system.
    pub ts: Vector3f,
}

impl ShadingFrame {
    /// Creates a new `ShadingFrame` from a normal and a tangent. The tangent
    /// is made orthogonal to the normal; if it is parallel to the normal an
    /// arbitrary tangent is chosen.
    ///
    /// * `n`    - The normal.
    /// * `dpdu` - The tangent direction.
    pub fn new(n: &Normal3f, dpdu: &Vector3f) -> Self {
        let ns = n.normalize();
        let nv = Vector3f::from(ns);
        let t = *dpdu - nv * nv.dot(dpdu);
        let ss = if t.length_squared() > 1e-12 {
            t.normalize()
        } else {
            coordinate_system(&nv).0
        };
        Self {
            ns,
            ss,
            ts: nv.cross(&ss),
        }
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        )
    }

    /// Returns a frame whose normal is tilted to the given local-space
    /// direction. The current first axis seeds the new tangent.
    ///
    /// * `n` - The new normal in this frame's local space.
    pub fn perturb(&self, n: &Vector3f) -> Self {
        if n.length_squared() == 0.0 || !n.is_finite() {
            return *self;
        }
        let nw = self.local_to_world(&n.normalize());
        Self::new(&Normal3f::from(nw), &self.ss)
    }

    /// Returns a frame with the normal decoded from a tangent-space normal map
    /// texel `c` in [0, 1]^3 as `2c - 1`.
    ///
    /// * `rgb` - The texel.
    pub fn perturb_with_texel(&self, rgb: &[Float; 3]) -> Self {
        let n = Vector3f::new(2.0 * rgb[0] - 1.0, 2.0 * rgb[1] - 1.0, 2.0 * rgb[2] - 1.0);
        self.perturb(&n)
    }
}

impl From<&SurfaceInteraction> for ShadingFrame {
    /// Builds the frame from the shading geometry of a surface interaction.
    ///
    /// * `si` - The surface interaction.
    fn from(si: &SurfaceInteraction) -> Self {
        Self::new(&si.shading.n, &si.shading.dpdu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn default_interaction_is_identity() {
        let frame = ShadingFrame::from(&SurfaceInteraction::default());
        let v = Vector3f::new(0.48, -0.6, 0.64);
        assert_eq!(frame.world_to_local(&v), v);
        assert_eq!(frame.local_to_world(&v), v);
    }

    #[test]
    fn flat_normal_map_texel_keeps_frame() {
        let frame = ShadingFrame::from(&SurfaceInteraction::default());
        let p = frame.perturb_with_texel(&[0.5, 0.5, 1.0]);
        assert!(approx_eq!(f32, p.ns.z, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, p.ss.x, 1.0, epsilon = 1e-6));
    }

    #[test]
    fn degenerate_texel_keeps_frame() {
        let frame = ShadingFrame::from(&SurfaceInteraction::default());
        let p = frame.perturb_with_texel(&[0.5, 0.5, 0.5]);
        assert_eq!(p.ns, frame.ns);
    }

    #[test]
    fn tangent_parallel_to_normal() {
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let frame = ShadingFrame::new(&n, &Vector3f::new(0.0, 0.0, 2.0));
        assert!(approx_eq!(f32, frame.ss.length(), 1.0, epsilon = 1e-6));
        assert!(frame.ss.dot(&n).abs() < 1e-6);
    }

    prop_direction!(direction, -1.0..1.0f32, 0.0..TWO_PI);

    proptest! {
        #[test]
        fn round_trip(n in direction(), t in direction(), v in direction()) {
            let frame = ShadingFrame::new(&Normal3f::from(n), &t);
            let w = frame.local_to_world(&frame.world_to_local(&v));
            prop_assert!(approx_eq!(f32, w.x, v.x, epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, w.y, v.y, epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, w.z, v.z, epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, frame.world_to_local(&n).z, 1.0, epsilon = 1e-4));
        }

        #[test]
        fn perturbed_normal_is_followed(n in direction(), m in upper_direction()) {
            let frame = ShadingFrame::new(&Normal3f::from(n), &Vector3f::new(1.0, 0.0, 0.0));
            let p = frame.perturb(&m);
            let expected = frame.local_to_world(&m);
            prop_assert!(approx_eq!(f32, Vector3f::from(p.ns).dot(&expected), 1.0, epsilon = 1e-4));
            prop_assert!(p.ss.dot(&p.ns).abs() < 1e-4);
        }
    }

    prop_direction!(upper_direction, 0.1..1.0f32, 0.0..TWO_PI);
}
